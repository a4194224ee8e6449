//! Apply-channel configuration stored with each posting.
//!
//! The five channels are a closed set. Each one carries the shared
//! `enabled`/`priority`/`popupContent` settings plus its own target
//! parameters. On the wire (and in the `channels` JSON column) the
//! configuration is one object keyed by channel name.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ChannelKind {
    #[serde(rename = "gmail")]
    Gmail,
    #[serde(rename = "zalo")]
    Zalo,
    #[serde(rename = "facebook")]
    Facebook,
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "google_form")]
    GoogleForm,
}

impl ChannelKind {
    /// Declaration order; also the tie-break order for equal priorities.
    pub const ALL: [ChannelKind; 5] = [
        ChannelKind::Gmail,
        ChannelKind::Zalo,
        ChannelKind::Facebook,
        ChannelKind::LinkedIn,
        ChannelKind::GoogleForm,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChannelKind::Gmail => "gmail",
            ChannelKind::Zalo => "zalo",
            ChannelKind::Facebook => "facebook",
            ChannelKind::LinkedIn => "linkedin",
            ChannelKind::GoogleForm => "google_form",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    fn index(self) -> usize {
        match self {
            ChannelKind::Gmail => 0,
            ChannelKind::Zalo => 1,
            ChannelKind::Facebook => 2,
            ChannelKind::LinkedIn => 3,
            ChannelKind::GoogleForm => 4,
        }
    }

    pub fn default_priority(self) -> i32 {
        self.index() as i32 + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistItem {
    pub title: String,
    pub description: String,
}

/// Copy of the dialog shown before a visitor is sent to a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupContent {
    pub title: String,
    pub description: String,
    pub checklist_items: Vec<ChecklistItem>,
    pub button_text: String,
}

/// Channel-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTarget {
    /// Uses `jobInfo.email`.
    Gmail,
    Zalo { phone: String },
    Facebook { url: String },
    /// Uses `jobInfo.linkedin`.
    LinkedIn,
    GoogleForm { sheet_url: String },
}

impl ChannelTarget {
    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelTarget::Gmail => ChannelKind::Gmail,
            ChannelTarget::Zalo { .. } => ChannelKind::Zalo,
            ChannelTarget::Facebook { .. } => ChannelKind::Facebook,
            ChannelTarget::LinkedIn => ChannelKind::LinkedIn,
            ChannelTarget::GoogleForm { .. } => ChannelKind::GoogleForm,
        }
    }

    fn empty(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Gmail => ChannelTarget::Gmail,
            ChannelKind::Zalo => ChannelTarget::Zalo {
                phone: String::new(),
            },
            ChannelKind::Facebook => ChannelTarget::Facebook { url: String::new() },
            ChannelKind::LinkedIn => ChannelTarget::LinkedIn,
            ChannelKind::GoogleForm => ChannelTarget::GoogleForm {
                sheet_url: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub target: ChannelTarget,
    pub enabled: bool,
    pub priority: i32,
    pub popup_content: Option<PopupContent>,
}

impl Channel {
    pub fn kind(&self) -> ChannelKind {
        self.target.kind()
    }

    fn default_for(kind: ChannelKind) -> Self {
        Self {
            target: ChannelTarget::empty(kind),
            enabled: kind == ChannelKind::Gmail,
            priority: kind.default_priority(),
            popup_content: None,
        }
    }
}

/// All five channels plus the designated primary one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChannelConfigWire", into = "ChannelConfigWire")]
pub struct ChannelConfig {
    channels: [Channel; 5],
    /// `None` when the stored key names no known channel.
    primary_channel: Option<ChannelKind>,
}

impl Default for ChannelConfig {
    /// Gmail enabled only, priorities 1..=5 in declaration order, gmail primary.
    fn default() -> Self {
        Self {
            channels: ChannelKind::ALL.map(Channel::default_for),
            primary_channel: Some(ChannelKind::Gmail),
        }
    }
}

impl ChannelConfig {
    pub fn get(&self, kind: ChannelKind) -> &Channel {
        &self.channels[kind.index()]
    }

    /// Replaces the settings of one channel; the kind is taken from the target.
    pub fn set(&mut self, channel: Channel) {
        let index = channel.kind().index();
        self.channels[index] = channel;
    }

    pub fn enable(mut self, kind: ChannelKind, enabled: bool) -> Self {
        self.channels[kind.index()].enabled = enabled;
        self
    }

    pub fn with_priority(mut self, kind: ChannelKind, priority: i32) -> Self {
        self.channels[kind.index()].priority = priority;
        self
    }

    pub fn with_primary(mut self, kind: ChannelKind) -> Self {
        self.primary_channel = Some(kind);
        self
    }

    pub fn primary_channel(&self) -> Option<ChannelKind> {
        self.primary_channel
    }

    /// Channels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    /// Lenient mapping from the stored JSON column.
    ///
    /// Never fails: a missing or malformed document, channel entry or field
    /// falls back to the corresponding default.
    pub fn from_stored(raw: Option<&JsonValue>) -> Self {
        let defaults = Self::default();
        let Some(root) = raw.and_then(JsonValue::as_object) else {
            return defaults;
        };

        let channels = ChannelKind::ALL.map(|kind| {
            let fallback = defaults.get(kind).clone();
            let Some(entry) = root.get(kind.key()).and_then(JsonValue::as_object) else {
                return fallback;
            };
            let text = |field: &str| {
                entry
                    .get(field)
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let target = match kind {
                ChannelKind::Gmail => ChannelTarget::Gmail,
                ChannelKind::Zalo => ChannelTarget::Zalo { phone: text("phone") },
                ChannelKind::Facebook => ChannelTarget::Facebook { url: text("url") },
                ChannelKind::LinkedIn => ChannelTarget::LinkedIn,
                ChannelKind::GoogleForm => ChannelTarget::GoogleForm {
                    sheet_url: text("sheet_url"),
                },
            };
            Channel {
                target,
                enabled: entry
                    .get("enabled")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(fallback.enabled),
                priority: entry
                    .get("priority")
                    .and_then(JsonValue::as_i64)
                    .and_then(|p| i32::try_from(p).ok())
                    .unwrap_or(fallback.priority),
                popup_content: entry
                    .get("popupContent")
                    .filter(|v| v.is_object())
                    .and_then(|v| serde_json::from_value(v.clone()).ok()),
            }
        });

        let primary_channel = match root.get("primaryChannel") {
            None | Some(JsonValue::Null) => defaults.primary_channel,
            Some(value) => value.as_str().and_then(ChannelKind::from_key),
        };

        Self {
            channels,
            primary_channel,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Extracts the spreadsheet id from a `docs.google.com/spreadsheets/d/<id>` URL.
pub fn extract_sheet_id(sheet_url: &str) -> Option<String> {
    let parsed = url::Url::parse(sheet_url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    if parsed.host_str() != Some("docs.google.com") {
        return None;
    }
    let mut segments = parsed.path_segments()?;
    if segments.next() != Some("spreadsheets") || segments.next() != Some("d") {
        return None;
    }
    let id = segments.next()?;
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| id.to_string())
}

// Stored/wire shape of the configuration.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedWire {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    popup_content: Option<PopupContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlainChannelWire {
    #[serde(flatten)]
    shared: SharedWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ZaloWire {
    #[serde(flatten)]
    shared: SharedWire,
    #[serde(default)]
    phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FacebookWire {
    #[serde(flatten)]
    shared: SharedWire,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoogleFormWire {
    #[serde(flatten)]
    shared: SharedWire,
    #[serde(default)]
    sheet_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelConfigWire {
    gmail: Option<PlainChannelWire>,
    zalo: Option<ZaloWire>,
    facebook: Option<FacebookWire>,
    linkedin: Option<PlainChannelWire>,
    #[serde(rename = "google_form")]
    google_form: Option<GoogleFormWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_channel: Option<String>,
}

impl SharedWire {
    fn from_channel(channel: &Channel) -> Self {
        Self {
            enabled: Some(channel.enabled),
            priority: Some(channel.priority),
            popup_content: channel.popup_content.clone(),
        }
    }

    /// Omitted `enabled`/`priority` keep the channel's defaults.
    fn into_channel(self, target: ChannelTarget) -> Channel {
        let fallback = Channel::default_for(target.kind());
        Channel {
            target,
            enabled: self.enabled.unwrap_or(fallback.enabled),
            priority: self.priority.unwrap_or(fallback.priority),
            popup_content: self.popup_content,
        }
    }
}

impl From<ChannelConfigWire> for ChannelConfig {
    fn from(wire: ChannelConfigWire) -> Self {
        let mut config = ChannelConfig::default();
        if let Some(gmail) = wire.gmail {
            config.set(gmail.shared.into_channel(ChannelTarget::Gmail));
        }
        if let Some(zalo) = wire.zalo {
            config.set(zalo.shared.into_channel(ChannelTarget::Zalo { phone: zalo.phone }));
        }
        if let Some(facebook) = wire.facebook {
            config.set(
                facebook
                    .shared
                    .into_channel(ChannelTarget::Facebook { url: facebook.url }),
            );
        }
        if let Some(linkedin) = wire.linkedin {
            config.set(linkedin.shared.into_channel(ChannelTarget::LinkedIn));
        }
        if let Some(form) = wire.google_form {
            config.set(form.shared.into_channel(ChannelTarget::GoogleForm {
                sheet_url: form.sheet_url,
            }));
        }
        if let Some(primary) = wire.primary_channel {
            config.primary_channel = ChannelKind::from_key(&primary);
        }
        config
    }
}

impl From<ChannelConfig> for ChannelConfigWire {
    fn from(config: ChannelConfig) -> Self {
        let mut wire = ChannelConfigWire {
            gmail: None,
            zalo: None,
            facebook: None,
            linkedin: None,
            google_form: None,
            primary_channel: config.primary_channel.map(|kind| kind.key().to_string()),
        };
        for channel in config.channels.iter() {
            let shared = SharedWire::from_channel(channel);
            match &channel.target {
                ChannelTarget::Gmail => wire.gmail = Some(PlainChannelWire { shared }),
                ChannelTarget::Zalo { phone } => {
                    wire.zalo = Some(ZaloWire {
                        shared,
                        phone: phone.clone(),
                    })
                }
                ChannelTarget::Facebook { url } => {
                    wire.facebook = Some(FacebookWire {
                        shared,
                        url: url.clone(),
                    })
                }
                ChannelTarget::LinkedIn => wire.linkedin = Some(PlainChannelWire { shared }),
                ChannelTarget::GoogleForm { sheet_url } => {
                    wire.google_form = Some(GoogleFormWire {
                        shared,
                        sheet_url: sheet_url.clone(),
                    })
                }
            }
        }
        wire
    }
}
