#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantData {
    pub name: String,
    pub email: String,
}
