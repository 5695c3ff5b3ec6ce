/// Typed errors internal to level-file parsing; converted to `anyhow::Error`
/// at the CLI boundary.
#[derive(Debug, thiserror::Error)]
pub enum LevelParseError {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("missing required attribute `{0}` on <level>")]
    MissingAttribute(&'static str),

    #[error("invalid value `{value}` for attribute `{name}`")]
    InvalidAttribute { name: &'static str, value: String },

    #[error("invalid move notation `{0}`")]
    InvalidMove(String),

    #[error(transparent)]
    Board(#[from] anyhow::Error),
}
