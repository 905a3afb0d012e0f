// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTML rendering of notification messages.
//!
//! All caller-supplied text is escaped before it is placed in markup.

use complaint_desk_domain::{Complaint, Priority, Status};
use std::fmt::Write as _;
use time::OffsetDateTime;
use time::macros::format_description;

/// A fully addressed message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Subject and body of a rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailContent {
    pub subject: String,
    pub html_body: String,
}

impl OutgoingMail {
    #[must_use]
    pub fn new(from: &str, to: &str, content: MailContent) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: content.subject,
            html_body: content.html_body,
        }
    }
}

/// Escapes text for inclusion in HTML element content or attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped: String = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const fn priority_colour(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "#dc3545",
        Priority::Medium => "#ffc107",
        Priority::Low => "#28a745",
    }
}

const fn status_colour(status: Status) -> &'static str {
    match status {
        Status::Pending => "#6c757d",
        Status::InProgress => "#007bff",
        Status::Resolved => "#28a745",
        Status::Closed => "#343a40",
    }
}

fn format_date(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| at.date().to_string())
}

fn detail_row(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        r#"<tr><td style="padding: 8px 0; font-weight: bold; width: 120px;">{label}:</td><td style="padding: 8px 0;">{value}</td></tr>"#
    );
}

fn priority_badge(priority: Priority) -> String {
    format!(
        r#"<span style="background-color: {}; color: white; padding: 2px 8px; border-radius: 3px; font-size: 12px;">{priority}</span>"#,
        priority_colour(priority)
    )
}

/// Renders the administrator alert for a newly submitted complaint.
#[must_use]
pub fn render_new_complaint(complaint: &Complaint) -> MailContent {
    let mut html: String = String::from(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">"#,
    );
    html.push_str(
        r#"<h2 style="color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px;">New Complaint Received</h2>"#,
    );
    html.push_str(
        r#"<div style="background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;"><h3 style="color: #007bff; margin-top: 0;">Complaint Details</h3><table style="width: 100%; border-collapse: collapse;">"#,
    );

    detail_row(&mut html, "Title", &escape_html(&complaint.title));
    detail_row(&mut html, "Category", complaint.category.as_str());
    detail_row(&mut html, "Priority", &priority_badge(complaint.priority));
    detail_row(&mut html, "Status", complaint.status.as_str());
    detail_row(&mut html, "Date", &format_date(complaint.date_submitted));
    if let Some(name) = &complaint.customer_name {
        detail_row(&mut html, "Customer", &escape_html(name));
    }
    if let Some(email) = &complaint.email {
        detail_row(&mut html, "Email", &escape_html(email));
    }
    html.push_str("</table></div>");

    let _ = write!(
        html,
        r#"<div style="background-color: #ffffff; padding: 20px; border: 1px solid #dee2e6; border-radius: 5px;"><h4 style="color: #333; margin-top: 0;">Description:</h4><p style="line-height: 1.6; color: #555;">{}</p></div>"#,
        escape_html(&complaint.description)
    );
    html.push_str(
        r#"<div style="margin-top: 20px; padding: 15px; background-color: #e9ecef; border-radius: 5px;"><p style="margin: 0; font-size: 14px; color: #666;">Please log in to the admin dashboard to manage this complaint.</p></div></div>"#,
    );

    MailContent {
        subject: format!("New Complaint Submitted: {}", complaint.title),
        html_body: html,
    }
}

/// Renders the customer notice for a complaint whose status changed.
#[must_use]
pub fn render_status_change(complaint: &Complaint) -> MailContent {
    let greeting: String = complaint
        .customer_name
        .as_deref()
        .map_or_else(|| String::from("Customer"), escape_html);

    let mut html: String = String::from(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">"#,
    );
    html.push_str(
        r#"<h2 style="color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px;">Complaint Status Update</h2>"#,
    );
    let _ = write!(
        html,
        r#"<p style="font-size: 16px; color: #333;">Dear {greeting},</p><p style="line-height: 1.6; color: #555;">We wanted to update you on the status of your complaint. Here are the current details:</p>"#
    );
    html.push_str(
        r#"<div style="background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;"><table style="width: 100%; border-collapse: collapse;">"#,
    );

    let status_badge: String = format!(
        r#"<span style="background-color: {}; color: white; padding: 4px 12px; border-radius: 15px; font-size: 14px;">{}</span>"#,
        status_colour(complaint.status),
        complaint.status
    );
    detail_row(&mut html, "Complaint", &escape_html(&complaint.title));
    detail_row(&mut html, "Status", &status_badge);
    detail_row(&mut html, "Category", complaint.category.as_str());
    detail_row(&mut html, "Priority", &priority_badge(complaint.priority));
    detail_row(&mut html, "Last Updated", &format_date(complaint.updated_at));
    html.push_str("</table></div>");

    match complaint.status {
        Status::Resolved => html.push_str(
            r#"<div style="background-color: #d4edda; border: 1px solid #c3e6cb; padding: 15px; border-radius: 5px; margin: 20px 0;"><h4 style="color: #155724; margin-top: 0;">Great News!</h4><p style="color: #155724; margin: 0;">Your complaint has been resolved. If you have any questions or concerns about the resolution, please don't hesitate to contact us.</p></div>"#,
        ),
        Status::InProgress => html.push_str(
            r#"<div style="background-color: #cce7ff; border: 1px solid #99d6ff; padding: 15px; border-radius: 5px; margin: 20px 0;"><h4 style="color: #004085; margin-top: 0;">In Progress</h4><p style="color: #004085; margin: 0;">We are actively working on your complaint. We'll keep you updated as we make progress.</p></div>"#,
        ),
        Status::Pending | Status::Closed => {}
    }

    html.push_str(
        r#"<div style="margin-top: 20px; padding: 15px; background-color: #e9ecef; border-radius: 5px;"><p style="margin: 0; font-size: 14px; color: #666;">Thank you for your patience. If you have any questions, please reply to this email.</p></div><p style="margin-top: 20px; color: #666; font-size: 14px;">Best regards,<br>Customer Support Team</p></div>"#,
    );

    MailContent {
        subject: format!("Complaint Status Update: {}", complaint.title),
        html_body: html,
    }
}
