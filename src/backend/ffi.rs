//! Raw declarations for the parts of libdivecomputer 0.8 this crate calls.
//!
//! Linking is set up by `build.rs` when the `libdivecomputer` feature is on.
#![allow(non_camel_case_types, dead_code)]

use std::os::raw::{c_char, c_int, c_uchar, c_uint, c_void};

pub type dc_status_t = c_int;

pub const DC_STATUS_SUCCESS: dc_status_t = 0;
pub const DC_STATUS_DONE: dc_status_t = 1;
pub const DC_STATUS_NOMEMORY: dc_status_t = -3;

pub type dc_loglevel_t = c_int;

pub const DC_LOGLEVEL_NONE: dc_loglevel_t = 0;
pub const DC_LOGLEVEL_ERROR: dc_loglevel_t = 1;
pub const DC_LOGLEVEL_WARNING: dc_loglevel_t = 2;
pub const DC_LOGLEVEL_INFO: dc_loglevel_t = 3;
pub const DC_LOGLEVEL_DEBUG: dc_loglevel_t = 4;
pub const DC_LOGLEVEL_ALL: dc_loglevel_t = 5;

pub type dc_sample_type_t = c_int;

pub const DC_TIMEZONE_NONE: c_int = c_int::MIN;

#[repr(C)]
pub struct dc_context_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dc_iterator_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dc_descriptor_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dc_iostream_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dc_device_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dc_parser_t {
    _private: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct dc_version_t {
    pub major: c_uint,
    pub minor: c_uint,
    pub micro: c_uint,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct dc_datetime_t {
    pub year: c_int,
    pub month: c_int,
    pub day: c_int,
    pub hour: c_int,
    pub minute: c_int,
    pub second: c_int,
    pub timezone: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct dc_sample_pressure_t {
    pub tank: c_uint,
    pub value: f64,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct dc_sample_event_t {
    pub type_: c_uint,
    pub time: c_uint,
    pub flags: c_uint,
    pub value: c_uint,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct dc_sample_vendor_t {
    pub type_: c_uint,
    pub size: c_uint,
    pub data: *const c_void,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct dc_sample_ppo2_t {
    pub sensor: c_uint,
    pub value: f64,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct dc_sample_deco_t {
    pub type_: c_uint,
    pub time: c_uint,
    pub depth: f64,
    pub tts: c_uint,
}

/// Passed by value to the sample callback; the layout has to match the
/// C union exactly.
#[repr(C)]
#[derive(Clone, Copy)]
pub union dc_sample_value_t {
    pub time: c_uint,
    pub depth: f64,
    pub pressure: dc_sample_pressure_t,
    pub temperature: f64,
    pub event: dc_sample_event_t,
    pub rbt: c_uint,
    pub heartbeat: c_uint,
    pub bearing: c_uint,
    pub vendor: dc_sample_vendor_t,
    pub setpoint: f64,
    pub ppo2: dc_sample_ppo2_t,
    pub cns: f64,
    pub deco: dc_sample_deco_t,
    pub gasmix: c_uint,
}

pub type dc_dive_callback_t = Option<
    unsafe extern "C" fn(
        data: *const c_uchar,
        size: c_uint,
        fingerprint: *const c_uchar,
        fsize: c_uint,
        userdata: *mut c_void,
    ) -> c_int,
>;

pub type dc_sample_callback_t = Option<
    unsafe extern "C" fn(kind: dc_sample_type_t, value: dc_sample_value_t, userdata: *mut c_void),
>;

pub type dc_logfunc_t = Option<
    unsafe extern "C" fn(
        context: *mut dc_context_t,
        loglevel: dc_loglevel_t,
        file: *const c_char,
        line: c_uint,
        function: *const c_char,
        message: *const c_char,
        userdata: *mut c_void,
    ),
>;

extern "C" {
    pub fn dc_version(version: *mut dc_version_t) -> *const c_char;

    pub fn dc_context_new(context: *mut *mut dc_context_t) -> dc_status_t;
    pub fn dc_context_free(context: *mut dc_context_t) -> dc_status_t;
    pub fn dc_context_set_loglevel(
        context: *mut dc_context_t,
        loglevel: dc_loglevel_t,
    ) -> dc_status_t;
    pub fn dc_context_set_logfunc(
        context: *mut dc_context_t,
        logfunc: dc_logfunc_t,
        userdata: *mut c_void,
    ) -> dc_status_t;

    pub fn dc_descriptor_iterator(iterator: *mut *mut dc_iterator_t) -> dc_status_t;
    pub fn dc_iterator_next(iterator: *mut dc_iterator_t, item: *mut c_void) -> dc_status_t;
    pub fn dc_iterator_free(iterator: *mut dc_iterator_t) -> dc_status_t;
    pub fn dc_descriptor_free(descriptor: *mut dc_descriptor_t);
    pub fn dc_descriptor_get_vendor(descriptor: *mut dc_descriptor_t) -> *const c_char;
    pub fn dc_descriptor_get_product(descriptor: *mut dc_descriptor_t) -> *const c_char;

    pub fn dc_serial_open(
        iostream: *mut *mut dc_iostream_t,
        context: *mut dc_context_t,
        name: *const c_char,
    ) -> dc_status_t;
    pub fn dc_iostream_close(iostream: *mut dc_iostream_t) -> dc_status_t;

    pub fn dc_device_open(
        device: *mut *mut dc_device_t,
        context: *mut dc_context_t,
        descriptor: *mut dc_descriptor_t,
        iostream: *mut dc_iostream_t,
    ) -> dc_status_t;
    pub fn dc_device_foreach(
        device: *mut dc_device_t,
        callback: dc_dive_callback_t,
        userdata: *mut c_void,
    ) -> dc_status_t;
    pub fn dc_device_close(device: *mut dc_device_t) -> dc_status_t;

    pub fn dc_parser_new(parser: *mut *mut dc_parser_t, device: *mut dc_device_t) -> dc_status_t;
    pub fn dc_parser_set_data(
        parser: *mut dc_parser_t,
        data: *const c_uchar,
        size: c_uint,
    ) -> dc_status_t;
    pub fn dc_parser_get_datetime(
        parser: *mut dc_parser_t,
        datetime: *mut dc_datetime_t,
    ) -> dc_status_t;
    pub fn dc_parser_samples_foreach(
        parser: *mut dc_parser_t,
        callback: dc_sample_callback_t,
        userdata: *mut c_void,
    ) -> dc_status_t;
    pub fn dc_parser_destroy(parser: *mut dc_parser_t) -> dc_status_t;
}
