use serde::ser::SerializeStruct;
use serde::{ser, Serialize};

/// Slack's composition object for text.
///
/// <https://api.slack.com/reference/block-kit/composition-objects#text>
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Plaintext(String),
    /// "mrkdwn" is Slack's alternative to Markdown.
    ///
    /// <https://api.slack.com/reference/surfaces/formatting#basics>
    Mrkdwn(String),
}

impl Text {
    pub fn plain<T: Into<String>>(x: T) -> Self {
        Text::Plaintext(x.into())
    }

    pub fn mrkdwn<T: Into<String>>(x: T) -> Self {
        Text::Mrkdwn(x.into())
    }
}

impl ser::Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut state = serializer.serialize_struct("Text", 2)?;

        let (typ, text) = match self {
            Text::Plaintext(x) => ("plain_text", x),
            Text::Mrkdwn(x) => ("mrkdwn", x),
        };
        state.serialize_field("type", typ)?;
        state.serialize_field("text", text)?;

        state.end()
    }
}

/// Interactive elements that may appear within [Block::Actions] and
/// [Block::Input].
///
/// <https://api.slack.com/reference/block-kit/block-elements>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        text: Text,
        action_id: String,
    },
    PlainTextInput {
        action_id: String,
    },
    StaticSelect {
        action_id: String,
        options: Vec<SelectOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub text: Text,
    pub value: String,
}

impl SelectOption {
    /// An option whose label and value are the same.
    pub fn labelled<T: Into<String>>(x: T) -> Self {
        let x = x.into();
        SelectOption {
            text: Text::Plaintext(x.clone()),
            value: x,
        }
    }
}

/// Slack's block API is its most modern, and allows us to mix rich formatting
/// with foreign plaintext. This is our limited subset thereof.
///
/// <https://api.slack.com/reference/block-kit/blocks>
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Section(Text),
    Divider,
    Actions(Vec<Element>),
    Input {
        block_id: String,
        label: Text,
        element: Element,
    },
}

impl ser::Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut state = serializer.serialize_struct("Block", 4)?;

        match self {
            Block::Section(x) => {
                state.serialize_field("type", "section")?;
                state.serialize_field("text", x)?;
            }

            Block::Divider => {
                state.serialize_field("type", "divider")?;
            }

            Block::Actions(xs) => {
                state.serialize_field("type", "actions")?;
                state.serialize_field("elements", xs)?;
            }

            Block::Input {
                block_id,
                label,
                element,
            } => {
                state.serialize_field("type", "input")?;
                state.serialize_field("block_id", block_id)?;
                state.serialize_field("label", label)?;
                state.serialize_field("element", element)?;
            }
        };

        state.end()
    }
}
