//! Feishu interactive card message.
//!
//! Reference: https://open.feishu.cn/document/client-docs/bot-v3/add-custom-bot

use serde::Serialize;

/// Top-level body posted to a custom bot webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CardMessage {
    pub msg_type: &'static str,
    pub card: Card,
}

impl CardMessage {
    pub fn interactive(card: Card) -> Self {
        Self {
            msg_type: "interactive",
            card,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub config: CardConfig,
    pub header: CardHeader,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardConfig {
    pub wide_screen_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardHeader {
    pub title: Text,
    /// Header colour, e.g. `blue`
    pub template: &'static str,
}

/// A text object; `tag` selects plain text or Feishu markdown.
#[derive(Debug, Clone, Serialize)]
pub struct Text {
    pub tag: TextTag,
    pub content: String,
}

impl Text {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            tag: TextTag::PlainText,
            content: content.into(),
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            tag: TextTag::LarkMd,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTag {
    PlainText,
    LarkMd,
}

/// Card body elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Element {
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Text>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<Field>>,
    },
    Hr,
    Actions { actions: Vec<Action> },
}

/// One cell of a multi-column `div`.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub is_short: bool,
    pub text: Text,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Action {
    Button {
        text: Text,
        url: String,
        #[serde(rename = "type")]
        kind: ButtonKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Primary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_tags() {
        let elements = vec![
            Element::Div {
                text: Some(Text::markdown("**hi**")),
                fields: None,
            },
            Element::Hr,
            Element::Actions {
                actions: vec![Action::Button {
                    text: Text::plain("open"),
                    url: "https://example.com".to_string(),
                    kind: ButtonKind::Primary,
                }],
            },
        ];

        assert_eq!(
            serde_json::to_value(&elements).unwrap(),
            json!([
                {"tag": "div", "text": {"tag": "lark_md", "content": "**hi**"}},
                {"tag": "hr"},
                {"tag": "actions", "actions": [{
                    "tag": "button",
                    "text": {"tag": "plain_text", "content": "open"},
                    "url": "https://example.com",
                    "type": "primary"
                }]}
            ])
        );
    }

    #[test]
    fn test_interactive_message_envelope() {
        let message = CardMessage::interactive(Card {
            config: CardConfig {
                wide_screen_mode: true,
            },
            header: CardHeader {
                title: Text::plain("title"),
                template: "blue",
            },
            elements: vec![],
        });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["msg_type"], "interactive");
        assert_eq!(value["card"]["config"]["wide_screen_mode"], true);
        assert_eq!(value["card"]["header"]["template"], "blue");
        assert_eq!(value["card"]["header"]["title"]["tag"], "plain_text");
    }
}
