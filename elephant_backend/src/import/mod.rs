mod csv_reader;
mod datastructures;

pub use csv_reader::{CSVReaderConfig, CSVParserErr, ParseResult, ParseWarning};
pub use datastructures::ParticipantData;

use elephant_entities::RosterError;

impl From<CSVParserErr> for RosterError {
    fn from(err: CSVParserErr) -> Self {
        match err {
            CSVParserErr::IoError(e) => RosterError::Io(e),
            CSVParserErr::ParseError(e) => RosterError::Csv(e),
            e => RosterError::InvalidInput(e.to_string()),
        }
    }
}
