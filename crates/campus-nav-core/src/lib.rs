pub mod cache;
pub mod config;
pub mod data_source;
pub mod export;
pub mod filter;
pub mod map_view;
pub mod mock_data;
pub mod model;
pub mod navigator;
pub mod routing;
pub mod selection;
pub mod voice;

pub use cache::StaffCache;
pub use config::Config;
pub use data_source::{DataError, DataSource, Dataset, JsonFileDataSource};
pub use filter::filter_departments;
pub use mock_data::MockDataSource;
pub use model::{Department, DepartmentType, Facility, LatLng, StaffMember, TypeFilter};
pub use navigator::Navigator;
pub use selection::{AppEvent, EndpointRole, SelectionState};
