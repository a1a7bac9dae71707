use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Inquiry;
use crate::state::AppState;

/// Validate an inquiry and send both notification emails: the lead alert to
/// the business inbox, then the acknowledgment back to the customer. Succeeds
/// only if both sends succeed; a failed send is reported once, generically,
/// and never retried.
pub async fn process_inquiry(state: &AppState, inquiry: &Inquiry) -> Result<(), AppError> {
    let invalid = inquiry.invalid_fields();
    if !invalid.is_empty() {
        return Err(AppError::Validation(format!(
            "missing or invalid fields: {}",
            invalid.join(", ")
        )));
    }

    let submission_id = Uuid::new_v4();
    tracing::info!(
        %submission_id,
        service = %inquiry.service,
        has_vehicle = inquiry.has_vehicle_info(),
        "processing contact inquiry"
    );

    let business_to = vec![state.config.contact_to_email.clone()];
    if let Err(e) = state
        .mailer
        .send_email(
            &state.config.contact_from_email,
            &business_to,
            &format!("New Inquiry: {}", inquiry.service.trim()),
            &render_business_email(inquiry),
        )
        .await
    {
        tracing::error!(%submission_id, error = %e, "business notification send failed");
        return Err(AppError::Delivery);
    }

    let customer_to = vec![inquiry.email.trim().to_string()];
    if let Err(e) = state
        .mailer
        .send_email(
            &state.config.contact_from_email,
            &customer_to,
            "We received your inquiry",
            &render_confirmation_email(inquiry),
        )
        .await
    {
        // The lead already reached the business inbox, but the caller is
        // told the submission failed so they know the confirmation never
        // arrived. Logged separately so the two legs are distinguishable.
        tracing::error!(%submission_id, error = %e, "customer acknowledgment send failed");
        return Err(AppError::Delivery);
    }

    tracing::info!(%submission_id, "inquiry emails sent");
    Ok(())
}

/// Escape user-supplied text before interpolating it into email HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn field_row(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {}</p>", escape_html(value.trim()))
}

pub fn render_business_email(inquiry: &Inquiry) -> String {
    let mut body = String::from("<h2>New Contact Form Submission</h2>");
    body.push_str(&field_row("Name", &inquiry.full_name()));
    body.push_str(&field_row("Email", &inquiry.email));
    body.push_str(&field_row("Phone", &inquiry.phone));
    if !inquiry.address.trim().is_empty() {
        body.push_str(&field_row("Address", &inquiry.address));
    }
    body.push_str(&field_row("Service Requested", &inquiry.service));

    if inquiry.has_vehicle_info() {
        let color = if inquiry.vehicle_color.trim().is_empty() {
            "Not specified".to_string()
        } else {
            escape_html(inquiry.vehicle_color.trim())
        };
        body.push_str(&format!(
            "<h3>Vehicle Details</h3>\
             <p>{} {} {}</p>\
             <p><strong>Color:</strong> {color}</p>",
            escape_html(inquiry.vehicle_year.trim()),
            escape_html(inquiry.vehicle_make.trim()),
            escape_html(inquiry.vehicle_model.trim()),
        ));
    }

    body.push_str(&format!(
        "<h3>Message</h3><p>{}</p>",
        escape_html(inquiry.message.trim())
    ));
    body
}

pub fn render_confirmation_email(inquiry: &Inquiry) -> String {
    format!(
        "<h2>Thanks for reaching out, {first}!</h2>\
         <p>We received your inquiry about <strong>{service}</strong> and will \
         get back to you within one business day.</p>\
         <p>Your message:</p>\
         <blockquote>{message}</blockquote>\
         <p>— The Prime Detail team</p>",
        first = escape_html(inquiry.first_name.trim()),
        service = escape_html(inquiry.service.trim()),
        message = escape_html(inquiry.message.trim()),
    )
}
