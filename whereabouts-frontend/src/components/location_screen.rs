use std::rc::Rc;

use gloo_timers::callback::Timeout;
use tracing::debug;
use whereabouts_common::{
    config::Config,
    effects::Platform,
    persistence::SavedLocationsStore,
    screen::{Effect, Msg, ScreenState},
    view::{self, MapRegion, REFRESH_LABEL},
};
use yew::{platform::spawn_local, prelude::*};

use super::{map::MapComponent, saved_list::SavedList};
use crate::services::{
    geocoder::NominatimGeocoder,
    geolocation::{BrowserGeolocator, BrowserPermissions},
    storage::BrowserStore,
};

type BrowserPlatform = Platform<BrowserPermissions, BrowserGeolocator, NominatimGeocoder, BrowserStore>;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub config: Rc<Config>,
}

pub struct LocationScreen {
    state: ScreenState,
    platform: Rc<BrowserPlatform>,
    notice_timeout: Option<Timeout>,
}

impl LocationScreen {
    fn run(ctx: &Context<Self>, platform: &Rc<BrowserPlatform>, effect: Effect) {
        debug!("Running {effect:?}");
        let platform = platform.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let msg = platform.perform(effect).await;
            link.send_message(msg);
        });
    }

    fn schedule_dismiss(&mut self, ctx: &Context<Self>) {
        self.notice_timeout = self.state.notice().map(|_| {
            let link = ctx.link().clone();
            Timeout::new(ctx.props().config.notice_ms, move || {
                link.send_message(Msg::DismissNotice);
            })
        });
    }
}

impl Component for LocationScreen {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;

        let platform = Platform::new(
            BrowserPermissions,
            BrowserGeolocator::new(config),
            NominatimGeocoder::new(config.geocoder_url.clone()),
            SavedLocationsStore::with_key(BrowserStore::new(), config.storage_key.clone()),
        );

        ctx.link().send_message(Msg::Mount);

        Self {
            state: ScreenState::new(),
            platform: Rc::new(platform),
            notice_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let before = self.state.clone();

        for effect in self.state.update(msg) {
            Self::run(ctx, &self.platform, effect);
        }

        if self.state.notice() != before.notice() {
            self.schedule_dismiss(ctx);
        }

        self.state != before
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = &ctx.props().config;
        let screen = view::render(&self.state);

        let save = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            Msg::Save
        });
        let refresh = ctx.link().callback(|_: MouseEvent| Msg::Refresh);
        let dismiss = ctx.link().callback(|_: MouseEvent| Msg::DismissNotice);

        let map = match screen.map {
            MapRegion::Map(fix) => html! {
                <MapComponent
                    position={fix.point()}
                    zoom={config.zoom}
                    tile_url={config.tile_url.clone()}
                    marker_title={config.marker_title.clone()}
                    marker_description={config.marker_description.clone()}
                />
            },
            MapRegion::Message(text) => html! {
                <div class="map-placeholder component-container">
                    <p>{text}</p>
                </div>
            },
        };

        html! {
            <div class="location-screen">
                {map}
                <div class="view-container">
                    <div class="actions">
                        <button
                            class="save-button"
                            style={format!("background-color: {}", config.accent_color)}
                            onclick={save}
                        >
                            {screen.save_label}
                        </button>
                        <button class="refresh-button" onclick={refresh}>
                            {REFRESH_LABEL}
                        </button>
                    </div>
                    if let Some(notice) = screen.notice {
                        <div class="notice" onclick={dismiss}>{notice}</div>
                    }
                    <SavedList rows={screen.rows} empty_message={screen.empty_message} />
                </div>
            </div>
        }
    }
}
