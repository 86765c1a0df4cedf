// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type definitions for query parameters, dataset records, and responses.

mod metric;
mod params;
mod record;
mod response;

pub use metric::Metric;
pub use params::{ComparisonParams, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use record::MetricRecord;
pub use response::{ComparisonRow, RegionAggregate, VaccinationCoverage};
