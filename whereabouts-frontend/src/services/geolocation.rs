use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use gloo_utils::window;
use js_sys::{Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{PermissionState, PermissionStatus, Position, PositionError, PositionOptions};
use whereabouts_common::{
    config::Config,
    locations::Fix,
    platform::{FixError, Geolocator, Permission, PermissionProvider},
};

use super::js_error;

// PositionError codes
const PERMISSION_DENIED: u16 = 1;
const TIMEOUT: u16 = 3;

/// Location permission via the Permissions API.
///
/// Browsers only prompt when a position is requested, so "prompt" counts as granted here
/// and a refusal at the prompt comes back from [`BrowserGeolocator`] as
/// [`FixError::PermissionDenied`].
pub struct BrowserPermissions;

impl PermissionProvider for BrowserPermissions {
    async fn request_foreground_location(&self) -> Permission {
        match query_geolocation_permission().await {
            Ok(PermissionState::Denied) => Permission::Denied,
            Ok(state) => {
                debug!("Geolocation permission: {state:?}");
                Permission::Granted
            }
            Err(err) => {
                warn!("Permissions API unavailable: {}", js_error(&err));
                Permission::Granted
            }
        }
    }
}

async fn query_geolocation_permission() -> Result<PermissionState, JsValue> {
    let descriptor = Object::new();
    Reflect::set(&descriptor, &"name".into(), &"geolocation".into())?;

    let promise = window().navigator().permissions()?.query(&descriptor)?;
    let status: PermissionStatus = JsFuture::from(promise).await?.dyn_into()?;
    Ok(status.state())
}

type FixSender = Rc<RefCell<Option<oneshot::Sender<Result<Fix, FixError>>>>>;

/// One shot position requests via `navigator.geolocation`.
pub struct BrowserGeolocator {
    high_accuracy: bool,
    timeout_ms: Option<u32>,
}

impl BrowserGeolocator {
    pub const fn new(config: &Config) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout_ms: config.fix_timeout_ms,
        }
    }

    fn options(&self) -> PositionOptions {
        let mut options = PositionOptions::new();
        options.enable_high_accuracy(self.high_accuracy);
        if let Some(timeout_ms) = self.timeout_ms {
            options.timeout(timeout_ms);
        }
        options
    }
}

impl Geolocator for BrowserGeolocator {
    async fn current_fix(&self) -> Result<Fix, FixError> {
        let geolocation = window()
            .navigator()
            .geolocation()
            .map_err(|err| FixError::Unavailable(js_error(&err)))?;

        let (tx, rx) = oneshot::channel();
        let tx: FixSender = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let tx = tx.clone();
            Closure::<dyn FnMut(_)>::new(move |position: Position| {
                let coords = position.coords();
                send(&tx, Ok(Fix::new(coords.latitude(), coords.longitude())));
            })
        };

        let on_error = Closure::<dyn FnMut(_)>::new(move |err: PositionError| {
            send(&tx, Err(fix_error(&err)));
        });

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &self.options(),
            )
            .map_err(|err| FixError::Unavailable(js_error(&err)))?;

        // The closures must outlive the request.
        let result = rx.await;
        drop((on_success, on_error));

        result.unwrap_or_else(|_| Err(FixError::Unavailable("position request dropped".into())))
    }
}

fn send(tx: &FixSender, result: Result<Fix, FixError>) {
    if let Some(tx) = tx.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

fn fix_error(err: &PositionError) -> FixError {
    match err.code() {
        PERMISSION_DENIED => FixError::PermissionDenied,
        TIMEOUT => FixError::Timeout,
        _ => FixError::Unavailable(err.message()),
    }
}
