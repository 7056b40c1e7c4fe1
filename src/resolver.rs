//! Model lookup in the library's descriptor catalog

use crate::backend::{DescriptorInfo, DiveComputerLibrary};
use crate::error::{DiveError, Result};
use log::debug;

/// Find the descriptor for `vendor`/`model`.
///
/// Both names are compared exactly and case-sensitively; the first match
/// in catalog order wins. Descriptors passed over are dropped as the scan
/// moves on. A catalog that cannot be opened counts as no match.
pub fn resolve<L: DiveComputerLibrary>(
    library: &L,
    vendor: &str,
    model: &str,
) -> Result<L::Descriptor> {
    let not_found = || DiveError::UnsupportedModel {
        vendor: vendor.to_string(),
        model: model.to_string(),
    };

    let descriptors = match library.descriptors() {
        Ok(descriptors) => descriptors,
        Err(e) => {
            debug!("Descriptor catalog unavailable: {e}");
            return Err(not_found());
        }
    };

    for descriptor in descriptors {
        if descriptor.vendor() == vendor && descriptor.product() == model {
            debug!("Resolved {vendor} {model}");
            return Ok(descriptor);
        }
    }

    Err(not_found())
}

/// Product names of every `vendor` model, in catalog order
pub fn supported_models<L: DiveComputerLibrary>(library: &L, vendor: &str) -> Result<Vec<String>> {
    Ok(library
        .descriptors()?
        .filter(|descriptor| descriptor.vendor() == vendor)
        .map(|descriptor| descriptor.product().into_owned())
        .collect())
}
