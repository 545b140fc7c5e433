pub mod observation_parser;

pub use observation_parser::ObservationParser;
