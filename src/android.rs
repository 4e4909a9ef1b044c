//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jint, jstring};
use jni::JNIEnv;

use crate::plan_json;

/// Plan a score and return the staff plan as JSON.
///
/// Called from Kotlin as:
///   external fun planScore(scoreJson: String, bpm: Int, geometryJson: String): String?
#[no_mangle]
pub extern "system" fn Java_com_staffscroll_app_StaffLib_planScore(
    mut env: JNIEnv,
    _class: JClass,
    score_json: JString,
    bpm: jint,
    geometry_json: JString,
) -> jstring {
    let score_str: String = match env.get_string(&score_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let geometry_str: String = match env.get_string(&geometry_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    if bpm <= 0 {
        return std::ptr::null_mut();
    }

    match plan_json(&score_str, bpm, &geometry_str) {
        Ok(json) => match env.new_string(&json) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}
