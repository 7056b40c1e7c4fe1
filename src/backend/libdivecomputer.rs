//! libdivecomputer backend
//!
//! Owned wrappers around the raw handles in [`ffi`]. Each wrapper frees its
//! handle in `Drop`, so a device is closed on every path out of an export,
//! including a failing `dc_device_foreach`.

use super::ffi;
use super::{
    check_library_version, DescriptorInfo, DiveCallback, DiveComputerLibrary, DiveDevice,
    DiveParser, SampleCallback,
};
use crate::error::{DiveError, Result};
use crate::types::{DiveControl, DiveDateTime, DiveRecord, Sample, SampleType, Status};
use log::{debug, error, warn};
use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_uchar, c_uint, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::ptr::{self, NonNull};
use std::rc::Rc;

fn check(operation: &'static str, raw: ffi::dc_status_t) -> Result<()> {
    let status = Status::from_raw(raw);
    if status.is_success() {
        Ok(())
    } else {
        Err(DiveError::library(operation, status))
    }
}

/// Take ownership of an out-pointer filled by a `*_new`/`*_open` call
fn take<T>(operation: &'static str, raw: ffi::dc_status_t, out: *mut T) -> Result<NonNull<T>> {
    check(operation, raw)?;
    NonNull::new(out).ok_or_else(|| DiveError::library(operation, Status::NoMemory))
}

unsafe fn lossy<'a>(text: *const c_char) -> Cow<'a, str> {
    if text.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(text).to_string_lossy()
    }
}

unsafe fn raw_slice<'a>(data: *const c_uchar, size: c_uint) -> &'a [u8] {
    if data.is_null() || size == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(data, size as usize)
    }
}

/// Version string reported by the linked library
pub fn library_version() -> String {
    unsafe { lossy(ffi::dc_version(ptr::null_mut())).into_owned() }
}

struct Context(NonNull<ffi::dc_context_t>);

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            ffi::dc_context_free(self.0.as_ptr());
        }
    }
}

fn loglevel_for(filter: log::LevelFilter) -> ffi::dc_loglevel_t {
    match filter {
        log::LevelFilter::Off => ffi::DC_LOGLEVEL_NONE,
        log::LevelFilter::Error => ffi::DC_LOGLEVEL_ERROR,
        log::LevelFilter::Warn => ffi::DC_LOGLEVEL_WARNING,
        log::LevelFilter::Info => ffi::DC_LOGLEVEL_INFO,
        log::LevelFilter::Debug => ffi::DC_LOGLEVEL_DEBUG,
        log::LevelFilter::Trace => ffi::DC_LOGLEVEL_ALL,
    }
}

unsafe extern "C" fn forward_log(
    _context: *mut ffi::dc_context_t,
    loglevel: ffi::dc_loglevel_t,
    _file: *const c_char,
    _line: c_uint,
    function: *const c_char,
    message: *const c_char,
    _userdata: *mut c_void,
) {
    let level = match loglevel {
        ffi::DC_LOGLEVEL_ERROR => log::Level::Error,
        ffi::DC_LOGLEVEL_WARNING => log::Level::Warn,
        ffi::DC_LOGLEVEL_INFO => log::Level::Info,
        ffi::DC_LOGLEVEL_DEBUG => log::Level::Debug,
        _ => log::Level::Trace,
    };
    log::log!(target: "libdivecomputer", level, "{}: {}", lossy(function), lossy(message));
}

/// Entry point to the system libdivecomputer
pub struct Libdivecomputer {
    context: Rc<Context>,
}

impl Libdivecomputer {
    /// Check the linked version and create a library context whose log
    /// output is forwarded to the `log` facade.
    pub fn new() -> Result<Self> {
        let version = library_version();
        check_library_version(&version)?;

        let mut raw: *mut ffi::dc_context_t = ptr::null_mut();
        let status = unsafe { ffi::dc_context_new(&mut raw) };
        let context = Context(take("dc_context_new", status, raw)?);

        unsafe {
            ffi::dc_context_set_loglevel(context.0.as_ptr(), loglevel_for(log::max_level()));
            ffi::dc_context_set_logfunc(context.0.as_ptr(), Some(forward_log), ptr::null_mut());
        }
        debug!("Using libdivecomputer {version}");

        Ok(Self {
            context: Rc::new(context),
        })
    }
}

pub struct Descriptor(NonNull<ffi::dc_descriptor_t>);

impl DescriptorInfo for Descriptor {
    fn vendor(&self) -> Cow<'_, str> {
        unsafe { lossy(ffi::dc_descriptor_get_vendor(self.0.as_ptr())) }
    }

    fn product(&self) -> Cow<'_, str> {
        unsafe { lossy(ffi::dc_descriptor_get_product(self.0.as_ptr())) }
    }
}

impl Drop for Descriptor {
    fn drop(&mut self) {
        unsafe { ffi::dc_descriptor_free(self.0.as_ptr()) }
    }
}

struct DescriptorIter(NonNull<ffi::dc_iterator_t>);

impl Iterator for DescriptorIter {
    type Item = Descriptor;

    fn next(&mut self) -> Option<Descriptor> {
        let mut raw: *mut ffi::dc_descriptor_t = ptr::null_mut();
        let status = unsafe {
            ffi::dc_iterator_next(self.0.as_ptr(), &mut raw as *mut _ as *mut c_void)
        };
        match status {
            ffi::DC_STATUS_SUCCESS => NonNull::new(raw).map(Descriptor),
            ffi::DC_STATUS_DONE => None,
            other => {
                warn!("Descriptor iteration stopped: {}", Status::from_raw(other));
                None
            }
        }
    }
}

impl Drop for DescriptorIter {
    fn drop(&mut self) {
        unsafe {
            ffi::dc_iterator_free(self.0.as_ptr());
        }
    }
}

struct IoStream(NonNull<ffi::dc_iostream_t>);

impl Drop for IoStream {
    fn drop(&mut self) {
        unsafe {
            ffi::dc_iostream_close(self.0.as_ptr());
        }
    }
}

/// Open dive computer. Field order is drop order after `Drop::drop` closes
/// the device: serial stream first, then the context.
pub struct Device {
    raw: NonNull<ffi::dc_device_t>,
    _iostream: IoStream,
    _context: Rc<Context>,
}

impl Drop for Device {
    fn drop(&mut self) {
        let status = unsafe { ffi::dc_device_close(self.raw.as_ptr()) };
        if status != ffi::DC_STATUS_SUCCESS {
            warn!("Closing the device failed: {}", Status::from_raw(status));
        }
    }
}

impl DiveComputerLibrary for Libdivecomputer {
    type Descriptor = Descriptor;
    type Device = Device;

    fn descriptors(&self) -> Result<Box<dyn Iterator<Item = Descriptor> + '_>> {
        let mut raw: *mut ffi::dc_iterator_t = ptr::null_mut();
        let status = unsafe { ffi::dc_descriptor_iterator(&mut raw) };
        let iterator = DescriptorIter(take("dc_descriptor_iterator", status, raw)?);
        Ok(Box::new(iterator))
    }

    fn open(&self, descriptor: Descriptor, transport: &Path) -> Result<Device> {
        let name = transport
            .to_str()
            .and_then(|name| CString::new(name).ok())
            .ok_or_else(|| DiveError::library("dc_serial_open", Status::InvalidArgs))?;

        let mut raw_stream: *mut ffi::dc_iostream_t = ptr::null_mut();
        let status =
            unsafe { ffi::dc_serial_open(&mut raw_stream, self.context.0.as_ptr(), name.as_ptr()) };
        let iostream = IoStream(take("dc_serial_open", status, raw_stream)?);

        let mut raw_device: *mut ffi::dc_device_t = ptr::null_mut();
        let status = unsafe {
            ffi::dc_device_open(
                &mut raw_device,
                self.context.0.as_ptr(),
                descriptor.0.as_ptr(),
                iostream.0.as_ptr(),
            )
        };
        let raw = take("dc_device_open", status, raw_device)?;
        drop(descriptor);

        Ok(Device {
            raw,
            _iostream: iostream,
            _context: Rc::clone(&self.context),
        })
    }
}

unsafe extern "C" fn dive_trampoline(
    data: *const c_uchar,
    size: c_uint,
    fingerprint: *const c_uchar,
    fsize: c_uint,
    userdata: *mut c_void,
) -> c_int {
    let on_dive = &mut *(userdata as *mut &mut DiveCallback<'_>);
    let record = DiveRecord::new(raw_slice(data, size), raw_slice(fingerprint, fsize));

    match panic::catch_unwind(AssertUnwindSafe(|| on_dive(&record))) {
        Ok(DiveControl::Continue) => 1,
        Ok(DiveControl::Stop) => 0,
        Err(_) => {
            error!("Dive callback panicked, stopping iteration");
            0
        }
    }
}

unsafe extern "C" fn sample_trampoline(
    kind: ffi::dc_sample_type_t,
    value: ffi::dc_sample_value_t,
    userdata: *mut c_void,
) {
    let on_sample = &mut *(userdata as *mut &mut SampleCallback<'_>);
    let sample = match SampleType::from_raw(kind) {
        SampleType::Time => Sample::Time(value.time),
        SampleType::Depth => Sample::Depth(value.depth),
        other => Sample::Other(other),
    };

    if panic::catch_unwind(AssertUnwindSafe(|| on_sample(sample))).is_err() {
        error!("Sample callback panicked");
    }
}

impl DiveDevice for Device {
    fn foreach(&self, on_dive: &mut DiveCallback<'_>) -> Result<()> {
        let mut on_dive = on_dive;
        let userdata = &mut on_dive as *mut &mut DiveCallback<'_> as *mut c_void;
        let status =
            unsafe { ffi::dc_device_foreach(self.raw.as_ptr(), Some(dive_trampoline), userdata) };
        check("dc_device_foreach", status)
    }

    fn parser<'a>(&'a self, dive: &DiveRecord<'a>) -> Result<Box<dyn DiveParser + 'a>> {
        let size = c_uint::try_from(dive.data.len())
            .map_err(|_| DiveError::library("dc_parser_set_data", Status::InvalidArgs))?;

        let mut raw: *mut ffi::dc_parser_t = ptr::null_mut();
        let status = unsafe { ffi::dc_parser_new(&mut raw, self.raw.as_ptr()) };
        let parser = Parser {
            raw: take("dc_parser_new", status, raw)?,
            _data: PhantomData,
        };

        let status =
            unsafe { ffi::dc_parser_set_data(parser.raw.as_ptr(), dive.data.as_ptr(), size) };
        check("dc_parser_set_data", status)?;

        Ok(Box::new(parser))
    }
}

/// Parser bound to one dive's bytes; the bytes must outlive it
struct Parser<'a> {
    raw: NonNull<ffi::dc_parser_t>,
    _data: PhantomData<&'a [u8]>,
}

impl DiveParser for Parser<'_> {
    fn datetime(&mut self) -> Result<DiveDateTime> {
        let mut raw = ffi::dc_datetime_t::default();
        let status = unsafe { ffi::dc_parser_get_datetime(self.raw.as_ptr(), &mut raw) };
        check("dc_parser_get_datetime", status)?;

        let mut datetime = DiveDateTime::new(
            raw.year, raw.month, raw.day, raw.hour, raw.minute, raw.second,
        );
        if raw.timezone != ffi::DC_TIMEZONE_NONE {
            datetime.timezone = Some(raw.timezone);
        }
        Ok(datetime)
    }

    fn samples(&mut self, on_sample: &mut SampleCallback<'_>) -> Result<()> {
        let mut on_sample = on_sample;
        let userdata = &mut on_sample as *mut &mut SampleCallback<'_> as *mut c_void;
        let status = unsafe {
            ffi::dc_parser_samples_foreach(self.raw.as_ptr(), Some(sample_trampoline), userdata)
        };
        check("dc_parser_samples_foreach", status)
    }
}

impl Drop for Parser<'_> {
    fn drop(&mut self) {
        unsafe {
            ffi::dc_parser_destroy(self.raw.as_ptr());
        }
    }
}
