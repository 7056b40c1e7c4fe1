//! In-memory dive computer for tests
//!
//! [`MockLibrary`] serves a scripted catalog and a device holding scripted
//! dives. Shared [`MockCounters`] record how many descriptors are alive and
//! how often the device was opened and closed, so tests can assert that
//! every handle is released.

use super::{
    DescriptorInfo, DiveCallback, DiveComputerLibrary, DiveDevice, DiveParser, SampleCallback,
};
use crate::error::{DiveError, Result};
use crate::types::{DiveControl, DiveDateTime, DiveRecord, Sample, Status};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One scripted dive
#[derive(Debug, Clone)]
pub struct MockDive {
    pub data: Vec<u8>,
    pub fingerprint: Vec<u8>,
    pub datetime: Option<DiveDateTime>,
    pub samples: Vec<Sample>,
    pub fail_parser: bool,
    pub fail_samples: bool,
}

impl MockDive {
    /// `data` doubles as the dive's identity; keep it unique per device.
    pub fn new(data: &[u8], datetime: DiveDateTime) -> Self {
        Self {
            data: data.to_vec(),
            fingerprint: data.iter().rev().copied().collect(),
            datetime: Some(datetime),
            samples: Vec::new(),
            fail_parser: false,
            fail_samples: false,
        }
    }

    pub fn with_samples(mut self, samples: &[Sample]) -> Self {
        self.samples = samples.to_vec();
        self
    }

    /// Interleave time and depth samples, time first
    pub fn with_profile(self, profile: &[(u32, f64)]) -> Self {
        let samples: Vec<Sample> = profile
            .iter()
            .flat_map(|&(time, depth)| [Sample::Time(time), Sample::Depth(depth)])
            .collect();
        self.with_samples(&samples)
    }

    pub fn without_datetime(mut self) -> Self {
        self.datetime = None;
        self
    }

    pub fn failing_parser(mut self) -> Self {
        self.fail_parser = true;
        self
    }

    /// Emit every sample, then report a data format error
    pub fn failing_samples(mut self) -> Self {
        self.fail_samples = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct MockCounters {
    live_descriptors: Cell<usize>,
    opened: Cell<usize>,
    closed: Cell<usize>,
    dives_visited: Cell<usize>,
    last_transport: RefCell<Option<PathBuf>>,
}

impl MockCounters {
    pub fn live_descriptors(&self) -> usize {
        self.live_descriptors.get()
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }

    pub fn dives_visited(&self) -> usize {
        self.dives_visited.get()
    }

    pub fn last_transport(&self) -> Option<PathBuf> {
        self.last_transport.borrow().clone()
    }

    fn bump(cell: &Cell<usize>) {
        cell.set(cell.get() + 1);
    }
}

#[derive(Debug, Default)]
pub struct MockLibrary {
    catalog: Vec<(String, String)>,
    dives: Vec<MockDive>,
    catalog_status: Option<Status>,
    open_status: Option<Status>,
    foreach_status: Option<Status>,
    counters: Rc<MockCounters>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, vendor: &str, product: &str) -> Self {
        self.catalog.push((vendor.to_string(), product.to_string()));
        self
    }

    pub fn with_dive(mut self, dive: MockDive) -> Self {
        self.dives.push(dive);
        self
    }

    pub fn failing_catalog(mut self, status: Status) -> Self {
        self.catalog_status = Some(status);
        self
    }

    pub fn failing_open(mut self, status: Status) -> Self {
        self.open_status = Some(status);
        self
    }

    pub fn failing_foreach(mut self, status: Status) -> Self {
        self.foreach_status = Some(status);
        self
    }

    pub fn counters(&self) -> Rc<MockCounters> {
        Rc::clone(&self.counters)
    }
}

#[derive(Debug)]
pub struct MockDescriptor {
    vendor: String,
    product: String,
    counters: Rc<MockCounters>,
}

impl DescriptorInfo for MockDescriptor {
    fn vendor(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.vendor)
    }

    fn product(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.product)
    }
}

impl Drop for MockDescriptor {
    fn drop(&mut self) {
        let live = &self.counters.live_descriptors;
        live.set(live.get().saturating_sub(1));
    }
}

impl DiveComputerLibrary for MockLibrary {
    type Descriptor = MockDescriptor;
    type Device = MockDevice;

    fn descriptors(&self) -> Result<Box<dyn Iterator<Item = MockDescriptor> + '_>> {
        if let Some(status) = self.catalog_status {
            return Err(DiveError::library("dc_descriptor_iterator", status));
        }

        Ok(Box::new(self.catalog.iter().map(move |(vendor, product)| {
            MockCounters::bump(&self.counters.live_descriptors);
            MockDescriptor {
                vendor: vendor.clone(),
                product: product.clone(),
                counters: Rc::clone(&self.counters),
            }
        })))
    }

    fn open(&self, descriptor: MockDescriptor, transport: &Path) -> Result<MockDevice> {
        *self.counters.last_transport.borrow_mut() = Some(transport.to_path_buf());
        drop(descriptor);

        if let Some(status) = self.open_status {
            return Err(DiveError::library("dc_device_open", status));
        }

        MockCounters::bump(&self.counters.opened);
        Ok(MockDevice {
            dives: self.dives.clone(),
            foreach_status: self.foreach_status,
            counters: Rc::clone(&self.counters),
        })
    }
}

#[derive(Debug)]
pub struct MockDevice {
    dives: Vec<MockDive>,
    foreach_status: Option<Status>,
    counters: Rc<MockCounters>,
}

impl DiveDevice for MockDevice {
    fn foreach(&self, on_dive: &mut DiveCallback<'_>) -> Result<()> {
        if let Some(status) = self.foreach_status {
            return Err(DiveError::library("dc_device_foreach", status));
        }

        for dive in &self.dives {
            MockCounters::bump(&self.counters.dives_visited);
            let record = DiveRecord::new(&dive.data, &dive.fingerprint);
            if on_dive(&record) == DiveControl::Stop {
                break;
            }
        }
        Ok(())
    }

    fn parser<'a>(&'a self, dive: &DiveRecord<'a>) -> Result<Box<dyn DiveParser + 'a>> {
        let scripted = self
            .dives
            .iter()
            .find(|candidate| candidate.data == dive.data)
            .ok_or_else(|| DiveError::library("dc_parser_new", Status::InvalidArgs))?;

        if scripted.fail_parser {
            return Err(DiveError::library("dc_parser_new", Status::DataFormat));
        }

        Ok(Box::new(MockParser { dive: scripted }))
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        MockCounters::bump(&self.counters.closed);
    }
}

struct MockParser<'a> {
    dive: &'a MockDive,
}

impl DiveParser for MockParser<'_> {
    fn datetime(&mut self) -> Result<DiveDateTime> {
        self.dive
            .datetime
            .ok_or_else(|| DiveError::library("dc_parser_get_datetime", Status::Unsupported))
    }

    fn samples(&mut self, on_sample: &mut SampleCallback<'_>) -> Result<()> {
        for sample in &self.dive.samples {
            on_sample(*sample);
        }
        if self.dive.fail_samples {
            return Err(DiveError::library(
                "dc_parser_samples_foreach",
                Status::DataFormat,
            ));
        }
        Ok(())
    }
}
