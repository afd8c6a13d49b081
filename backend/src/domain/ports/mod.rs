//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod letter_command;
mod letter_query;
mod letter_store;

#[cfg(test)]
pub use letter_command::MockLetterCommand;
pub use letter_command::{CreateLetterRequest, CreateLetterResponse, LetterCommand};
#[cfg(test)]
pub use letter_query::MockLetterQuery;
pub use letter_query::{
    FindNearbyLettersRequest, FindNearbyLettersResponse, LetterQuery, ListLettersResponse,
};
#[cfg(test)]
pub use letter_store::MockLetterStore;
pub use letter_store::{LetterStore, LetterStoreError};
