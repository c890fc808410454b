//! Cache-first coffee venue search.
//!
//! [`Searcher`] reads the local store, tops it up from the external source
//! when too few fresh venues are cached, and returns venues annotated with
//! their opening state. Progress is reported through a [`StatusSink`].

pub mod locate;
pub mod search;
pub mod sink;
pub mod source;
pub mod store;

pub use locate::{find_nearby, FixedLocation, LocateError, LocationProvider, NoSensor};
pub use search::{SearchOutcome, Searcher, NO_RESULTS_MESSAGE, SEARCHING_MESSAGE};
pub use sink::{StatusSink, TracingSink};
pub use source::VenueSource;
pub use store::{PgVenueStore, VenueStore, WriteError};
