use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Main,
    Sub,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Main => "main",
            StreamType::Sub => "sub",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main" => Some(StreamType::Main),
            "sub" => Some(StreamType::Sub),
            _ => None,
        }
    }
}
