//! Turns a posting's stored channel configuration into what the detail page
//! renders: the ordered button row and the single primary call-to-action.

use serde::Serialize;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::models::channel::{
    Channel, ChannelConfig, ChannelKind, ChannelTarget, ChecklistItem, PopupContent,
};
use crate::models::job_posting::JobInfo;

const FALLBACK_JOB_TITLE: &str = "Vị trí tuyển dụng";
const NOTHING_ENABLED_CTA: &str = "Ứng tuyển ngay";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelAction {
    /// Navigate away to `url`.
    Link { url: String },
    /// Open the in-page application form.
    Form { sheet_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChannel {
    pub channel: ChannelKind,
    #[schema(value_type = String)]
    pub label: &'static str,
    #[schema(value_type = String)]
    pub icon: &'static str,
    pub priority: i32,
    pub action: ChannelAction,
    pub popup_content: Option<PopupContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResolution {
    /// Enabled channels, ascending priority.
    pub buttons: Vec<ResolvedChannel>,
    pub primary: Option<ResolvedChannel>,
    pub primary_cta_text: String,
}

/// Pure: the same inputs always yield the same resolution.
pub fn resolve_channels(
    job_info: &JobInfo,
    channels: &ChannelConfig,
    company_fallback: &str,
) -> ChannelResolution {
    let mut enabled: Vec<&Channel> = channels.iter().filter(|c| c.enabled).collect();
    // stable sort keeps declaration order among equal priorities
    enabled.sort_by_key(|c| c.priority);

    let buttons: Vec<ResolvedChannel> = enabled
        .iter()
        .map(|c| resolve_one(c, job_info, company_fallback))
        .collect();

    let preferred = channels.primary_channel();
    let primary = buttons
        .iter()
        .find(|b| Some(b.channel) == preferred)
        .or_else(|| buttons.first())
        .cloned();

    let primary_cta_text = primary
        .as_ref()
        .map(|p| cta_text(p.channel))
        .unwrap_or(NOTHING_ENABLED_CTA)
        .to_string();

    ChannelResolution {
        buttons,
        primary,
        primary_cta_text,
    }
}

fn resolve_one(channel: &Channel, job_info: &JobInfo, company_fallback: &str) -> ResolvedChannel {
    let kind = channel.kind();
    let (label, icon) = label_and_icon(kind);
    let action = match &channel.target {
        ChannelTarget::Gmail => ChannelAction::Link {
            url: gmail_compose_url(job_info, company_fallback),
        },
        ChannelTarget::Zalo { phone } => ChannelAction::Link {
            url: zalo_url(phone),
        },
        ChannelTarget::Facebook { url } => ChannelAction::Link { url: url.clone() },
        ChannelTarget::LinkedIn => ChannelAction::Link {
            url: job_info.linkedin.clone(),
        },
        ChannelTarget::GoogleForm { sheet_url } => ChannelAction::Form {
            sheet_url: sheet_url.clone(),
        },
    };
    ResolvedChannel {
        channel: kind,
        label,
        icon,
        priority: channel.priority,
        action,
        popup_content: channel
            .popup_content
            .clone()
            .or_else(|| default_popup_content(kind)),
    }
}

pub fn label_and_icon(kind: ChannelKind) -> (&'static str, &'static str) {
    match kind {
        ChannelKind::Gmail => ("Email", "mail"),
        ChannelKind::Zalo => ("Zalo", "message-circle"),
        ChannelKind::Facebook => ("Facebook", "facebook"),
        ChannelKind::LinkedIn => ("LinkedIn", "linkedin"),
        ChannelKind::GoogleForm => ("Điền form", "file-spreadsheet"),
    }
}

pub fn cta_text(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Gmail => "Ứng tuyển qua Email",
        ChannelKind::Zalo => "Ứng tuyển qua Zalo",
        ChannelKind::Facebook => "Ứng tuyển qua Facebook",
        ChannelKind::LinkedIn => "Ứng tuyển qua LinkedIn",
        ChannelKind::GoogleForm => "Điền form ứng tuyển",
    }
}

pub fn gmail_compose_url(job_info: &JobInfo, company_fallback: &str) -> String {
    let title = non_empty(&job_info.title).unwrap_or(FALLBACK_JOB_TITLE);
    let company = non_empty(&job_info.company).unwrap_or(company_fallback);
    let subject = format!("[Ứng tuyển] {} - {}", title, company);
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("view", "cm")
        .append_pair("to", job_info.email.trim())
        .append_pair("su", &subject)
        .finish();
    format!("https://mail.google.com/mail/?{}", query)
}

pub fn zalo_url(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://zalo.me/{}", digits)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn checklist(items: &[(&str, &str)]) -> Vec<ChecklistItem> {
    items
        .iter()
        .map(|(title, description)| ChecklistItem {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Built-in dialog copy. The form channel has none: it opens the form directly.
pub fn default_popup_content(kind: ChannelKind) -> Option<PopupContent> {
    let chat_checklist = [
        ("Chuẩn bị sẵn CV", "Để gửi nhanh khi được yêu cầu"),
        ("Giới thiệu ngắn về bản thân", "Kinh nghiệm và mục tiêu của bạn"),
    ];
    let content = match kind {
        ChannelKind::Gmail => PopupContent {
            title: "Ứng tuyển qua Email".into(),
            description: "Gửi email kèm các nội dung sau để mình review nhanh hơn nhé!".into(),
            checklist_items: checklist(&[
                ("CV của bạn", "PDF hoặc link Google Docs/Notion đều được"),
                (
                    "1 thứ chứng minh \"delivery\"",
                    "Landing page, content chuyển đổi, campaign, deck, one-pager, case tự làm...",
                ),
                (
                    "Link portfolio (nếu có)",
                    "Website cá nhân, Behance, hoặc folder Google Drive",
                ),
            ]),
            button_text: "Gửi Email ngay".into(),
        },
        ChannelKind::Zalo => PopupContent {
            title: "Ứng tuyển qua Zalo".into(),
            description: "Nhắn tin qua Zalo để trao đổi trực tiếp với mình nhé!".into(),
            checklist_items: checklist(&chat_checklist),
            button_text: "Chat Zalo ngay".into(),
        },
        ChannelKind::Facebook => PopupContent {
            title: "Ứng tuyển qua Facebook".into(),
            description: "Nhắn tin qua Messenger để trao đổi trực tiếp!".into(),
            checklist_items: checklist(&chat_checklist),
            button_text: "Chat Messenger ngay".into(),
        },
        ChannelKind::LinkedIn => PopupContent {
            title: "Ứng tuyển qua LinkedIn".into(),
            description: "Kết nối và nhắn tin qua LinkedIn!".into(),
            checklist_items: checklist(&[
                ("Cập nhật profile LinkedIn", "Đảm bảo thông tin mới nhất"),
                (
                    "Gửi lời mời kết nối kèm lời nhắn",
                    "Giới thiệu ngắn về bạn và vị trí ứng tuyển",
                ),
            ]),
            button_text: "Mở LinkedIn".into(),
        },
        ChannelKind::GoogleForm => return None,
    };
    Some(content)
}
