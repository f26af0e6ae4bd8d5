//! JNI bindings for the Android app.
//!
//! Each public function here corresponds to an `external fun` declaration
//! in NavBridge.kt. The function names follow JNI naming conventions:
//! Java_<package>_<class>_<method> with dots replaced by underscores.
//!
//! Trackers cross the boundary as opaque `long` handles owned by the
//! Kotlin side, which must call `destroyTracker` exactly once per handle.

use jni::objects::{JByteArray, JClass, JString};
use jni::sys::{jboolean, jdouble, jlong, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use crate::route::{Coordinate, Route};
use crate::tracker::NavigationTracker;

/// Returns the library version.
/// Maps to: NavBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_version(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    new_string_or_null(&env, crate::VERSION)
}

/// Installs the Android logger. Safe to call more than once.
/// Maps to: NavBridge.init()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_init(_env: JNIEnv, _class: JClass) {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("routeguide"),
    );
}

/// Maps to: NavBridge.createTracker() -> Long
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_createTracker(
    _env: JNIEnv,
    _class: JClass,
) -> jlong {
    Box::into_raw(Box::new(NavigationTracker::new())) as jlong
}

/// Maps to: NavBridge.destroyTracker(handle: Long)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_destroyTracker(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle != 0 {
        // SAFETY: handle came from createTracker and is destroyed once
        drop(unsafe { Box::from_raw(handle as *mut NavigationTracker) });
    }
}

/// Sets the tracker's route from its JSON form.
/// Maps to: NavBridge.setRoute(handle: Long, routeJson: String) -> Boolean
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_setRoute(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    route_json: JString,
) -> jboolean {
    let Some(tracker) = tracker_mut(handle) else {
        return JNI_FALSE;
    };

    let json: String = match env.get_string(&route_json) {
        Ok(s) => s.into(),
        Err(e) => {
            log::warn!("setRoute: bad string: {e}");
            return JNI_FALSE;
        }
    };

    match serde_json::from_str::<Route>(&json) {
        Ok(route) => {
            tracker.set_route(route);
            JNI_TRUE
        }
        Err(e) => {
            log::warn!("setRoute: invalid route JSON: {e}");
            JNI_FALSE
        }
    }
}

/// Returns the instruction for a location, or null to keep the current one.
/// Maps to: NavBridge.onLocationUpdate(handle: Long, lat: Double, lon: Double) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_onLocationUpdate(
    env: JNIEnv,
    _class: JClass,
    handle: jlong,
    lat: jdouble,
    lon: jdouble,
) -> jstring {
    let Some(tracker) = tracker_mut(handle) else {
        return std::ptr::null_mut();
    };

    match tracker.on_location_update(&Coordinate { lat, lon }) {
        Some(instruction) => new_string_or_null(&env, instruction),
        None => std::ptr::null_mut(),
    }
}

/// Loads a route from GPX bytes and returns it as JSON, or null.
/// Maps to: NavBridge.loadGpxRoute(data: ByteArray, toleranceM: Double) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_routeguide_app_NavBridge_loadGpxRoute(
    env: JNIEnv,
    _class: JClass,
    data: JByteArray,
    tolerance_m: jdouble,
) -> jstring {
    let bytes = match env.convert_byte_array(&data) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("loadGpxRoute: bad byte array: {e}");
            return std::ptr::null_mut();
        }
    };

    let json = crate::gpx::load_route_bytes(&bytes, tolerance_m)
        .and_then(|route| Ok(serde_json::to_string(&route)?));

    match json {
        Ok(json) => new_string_or_null(&env, &json),
        Err(e) => {
            log::debug!("loadGpxRoute: {e}");
            std::ptr::null_mut()
        }
    }
}

fn tracker_mut<'a>(handle: jlong) -> Option<&'a mut NavigationTracker> {
    if handle == 0 {
        return None;
    }
    // SAFETY: non-zero handles come from createTracker and are only
    // used from the UI thread until destroyTracker
    Some(unsafe { &mut *(handle as *mut NavigationTracker) })
}

fn new_string_or_null(env: &JNIEnv, s: &str) -> jstring {
    match env.new_string(s) {
        Ok(js) => js.into_raw(),
        Err(e) => {
            log::warn!("failed to create Java string: {e}");
            std::ptr::null_mut()
        }
    }
}
