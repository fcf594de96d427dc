//! Outbound side: Feishu card model and the bot webhook client.

pub mod card;
pub mod client;

pub use card::{
    Action, ButtonKind, Card, CardConfig, CardHeader, CardMessage, Element, Field, Text, TextTag,
};
pub use client::{BotReply, FeishuNotifier};
