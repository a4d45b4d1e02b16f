use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, TileLayer};
use tap::Tap;
use tracing::debug;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{HtmlElement, Node};
use yew::prelude::*;

use crate::whereabouts_wasm::tooltip::{bind_title, set_title};

pub enum Msg {}

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    marker: Marker,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub position: geo::Point,
    pub zoom: f64,
    pub tile_url: AttrValue,
    pub marker_title: AttrValue,
    pub marker_description: AttrValue,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

fn lat_lng(point: geo::Point) -> LatLng {
    LatLng::new(point.y(), point.x())
}

impl Component for MapComponent {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        let container: HtmlElement = document()
            .create_element("div")
            .unwrap_throw()
            .dyn_into()
            .unwrap_throw();
        container.set_class_name("map");
        let leaflet_map = Map::new_with_element(&container, &MapOptions::default());

        let marker = Marker::new(&lat_lng(props.position))
            .tap(|marker| bind_title(marker, &props.marker_title, &props.marker_description));

        Self {
            map: leaflet_map,
            container,
            marker,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let props = ctx.props();
            self.map.set_view(&lat_lng(props.position), props.zoom);
            TileLayer::new(&props.tile_url).add_to(&self.map);
            self.marker.add_to(&self.map);
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, _msg: Self::Message) -> bool {
        false
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();

        if props.position != old_props.position {
            debug!("Moving map to {:?}", props.position);
            let center = lat_lng(props.position);
            self.marker.set_lat_lng(&center);
            self.map.set_view(&center, props.zoom);
        }

        if props.marker_title != old_props.marker_title
            || props.marker_description != old_props.marker_description
        {
            set_title(
                &self.marker,
                &props.marker_title,
                &props.marker_description,
            );
        }

        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map-container component-container">
                {self.render_map()}
            </div>
        }
    }
}
