//! Modal rendering - overlay, transaction forms and the error card
//!
//! Helper functions:
//! - render_overlay: Full-viewport backdrop around modal content
//! - render_transaction_form: Deposit / withdraw / transfer form
//! - render_error_card: Load failure notice with a refresh action

use bankportal_core::amount::ACCOUNT_ID_PATTERN;
use bankportal_core::{field, FormVisibility, TransactionKind};
use bankportal_utils::escape_html;

/// Wrap modal content in a dismissible backdrop.
///
/// With a dismiss URL, a click on the backdrop sends `DELETE` to it and
/// swaps the ledger; clicks on the content stop at the content.
pub fn render_overlay(content: &str, dismiss_url: Option<&str>) -> String {
    let dismiss = match dismiss_url {
        Some(url) => format!(
            "hx-delete='{}' hx-target='#ledger' hx-swap='outerHTML' hx-trigger='click'",
            url
        ),
        None => String::new(),
    };

    format!(
        r#"<div id='overlay' class='overlay fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' {}>
    <div class='mx-auto max-w-screen-xl px-4 py-16 sm:px-6 lg:px-8 w-full' onclick='event.stopPropagation()'>
        <div class='mx-auto max-w-lg'>{}</div>
    </div>
</div>"#,
        dismiss, content
    )
}

fn text_input(name: &str, placeholder: &str, extra: &str) -> String {
    format!(
        r#"<div>
    <label for='{name}' class='sr-only'>{placeholder}</label>
    <input id='{name}' name='{name}' type='text' required autocomplete='off' {extra}
        class='w-full rounded-lg border border-gray-200 p-4 pe-12 text-sm shadow-sm' placeholder='{placeholder}'>
</div>"#,
        name = name,
        placeholder = placeholder,
        extra = extra
    )
}

/// The form for the visible kind; empty when no form is open
pub fn render_transaction_form(visibility: FormVisibility) -> String {
    let Some(kind) = visibility.kind() else {
        return String::new();
    };

    let mut fields = String::new();
    match kind {
        TransactionKind::Deposit | TransactionKind::Withdraw => {
            fields.push_str(&text_input(field::DESCRIPTION, "Enter description", ""));
        }
        TransactionKind::Transfer => {
            fields.push_str(&text_input(field::RECIPIENT, "Enter recipient name", ""));
            fields.push_str(&text_input(
                field::ACCOUNT_ID,
                "Enter IBAN number",
                &format!("pattern='{}'", escape_html(ACCOUNT_ID_PATTERN)),
            ));
        }
    }

    fields.push_str(&format!(
        r#"<div>
    <label for='{name}' class='sr-only'>Amount</label>
    <input id='{name}' name='{name}' type='number' min='1' step='0.01' required autocomplete='off'
        class='w-full rounded-lg border border-gray-200 p-4 text-sm shadow-sm' placeholder='Enter amount'>
</div>"#,
        name = field::AMOUNT
    ));

    let form = format!(
        r#"<form id='transaction-form' hx-post='/transactions/{kind}' hx-target='#ledger' hx-swap='outerHTML'
    class='mb-0 mt-6 space-y-4 rounded-lg p-4 shadow-lg sm:p-6 lg:p-8 bg-white'>
    {fields}
    <button type='submit' class='block w-full rounded-lg bg-[#025257] px-5 py-3 text-sm font-medium text-white capitalize'>{kind} Money</button>
</form>"#,
        kind = kind,
        fields = fields
    );

    render_overlay(&form, Some("/forms"))
}

/// Load failure notice; the overlay cannot be dismissed
pub fn render_error_card(message: &str) -> String {
    let card = format!(
        r#"<div id='error-card' class='mb-0 mt-6 space-y-4 rounded-lg p-4 shadow-lg sm:p-6 lg:p-8 bg-white'>
    <p class='mb-5 text-red-800'>There was an error fetching the data. Please refresh the page to try again.</p>
    <label class='mr-2'>Error message:</label>
    <code class='bg-gray-100 p-2 rounded'>{}</code>
    <button type='button' onclick="fetch('/api/reload', {{method: 'POST'}}).finally(() => window.location.reload())"
        class='block w-full rounded-lg bg-[#025257] px-5 py-3 mt-5 text-sm font-medium text-white capitalize'>Refresh Page</button>
</div>"#,
        escape_html(message)
    );
    render_overlay(&card, None)
}
