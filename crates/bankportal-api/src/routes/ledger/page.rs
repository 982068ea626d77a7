//! Ledger page rendering
//!
//! Endpoints:
//! - page_index: Full portal page
//!
//! Helper functions:
//! - render_ledger: The swappable `#ledger` fragment every HTMX route returns
//! - render_balance_card, render_table, render_pagination

use crate::routes::forms::page::{render_error_card, render_transaction_form};
use crate::{page_response, AppState};
use bankportal_core::{Ledger, Transaction, TransactionKind};
use bankportal_utils::{escape_html, format_money};

const SORT_ARROW: &str = "M182.6 41.4c-12.5-12.5-32.8-12.5-45.3 0l-128 128c-9.2 9.2-11.9 22.9-6.9 34.9s16.6 19.8 29.6 19.8l256 0c12.9 0 24.6-7.8 29.6-19.8s2.2-25.7-6.9-34.9l-128-128z";

/// Full portal page
pub async fn page_index(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let ledger = state.ledger.read().await;
    let inner_content = format!(
        r#"<h1 class='text-4xl mb-1 text-white'>Hi, <span class='user-name min-w-10 inline-block h-full' contenteditable='plaintext-only'></span></h1>
<p class='mb-10 text-white'>Welcome to your banking portal</p>
{}"#,
        render_ledger(&ledger)
    );
    axum::response::Html(page_response(&headers, "Banking Portal", &inner_content))
}

/// Balance card with the three action buttons
pub fn render_balance_card(ledger: &Ledger) -> String {
    let symbol = &ledger.config().currency.symbol;
    let actions: Vec<String> = TransactionKind::ALL
        .iter()
        .map(|kind| {
            let (colors, label) = match kind {
                TransactionKind::Deposit => ("bg-green-100 text-green-600", "Deposit"),
                TransactionKind::Withdraw => ("bg-red-100 text-red-600", "Withdraw"),
                TransactionKind::Transfer => ("bg-yellow-200 text-yellow-700", "Transfer"),
            };
            format!(
                r#"<button hx-post='/forms/{}' hx-target='#ledger' hx-swap='outerHTML' class='flex flex-col text-center items-center cursor-pointer'>
    <span class='rounded-full {} p-3 mb-1 h-14 w-14 flex items-center justify-center text-xl font-bold'>{}</span>
    <p class='text-sm text-gray-500'>{}</p>
</button>"#,
                kind,
                colors,
                &label[..1],
                label
            )
        })
        .collect();

    format!(
        r#"<div class='stats mb-10 grid gap-10'>
    <div class='flex items-center rounded-lg border border-gray-100 bg-white p-6 gap-6 justify-between'>
        <div>
            <p id='balance' class='text-2xl font-medium text-gray-900'>{}</p>
            <p class='text-sm text-gray-500'>Balance</p>
        </div>
        <div class='flex gap-10'>{}</div>
    </div>
</div>"#,
        format_money(symbol, ledger.displayed_balance()),
        actions.join("")
    )
}

fn render_row(tx: &Transaction, symbol: &str) -> String {
    let amount_color = if tx.is_credit() { "text-green-600" } else { "text-red-600" };
    format!(
        r#"<tr>
    <td class='whitespace-nowrap px-4 py-2 font-medium text-gray-900'>{}</td>
    <td class='whitespace-nowrap px-4 py-2 text-gray-700'>{}</td>
    <td class='whitespace-nowrap px-4 py-2 text-right {}'>{}</td>
    <td class='whitespace-nowrap px-4 py-2 text-gray-700'>{}</td>
</tr>"#,
        escape_html(&tx.date),
        escape_html(&tx.description),
        amount_color,
        format_money(symbol, tx.amount),
        format_money(symbol, tx.balance)
    )
}

/// Transaction table for the current page with the sortable date header
pub fn render_table(ledger: &Ledger) -> String {
    let symbol = &ledger.config().currency.symbol;
    let rows: Vec<String> = ledger
        .current_page_transactions()
        .iter()
        .map(|tx| render_row(tx, symbol))
        .collect();

    let (up, down) = if ledger.sort().is_ascending() {
        ("black", "gray")
    } else {
        ("gray", "black")
    };

    format!(
        r#"<div class='overflow-x-auto rounded-t-lg'>
    <table class='min-w-full divide-y-2 divide-gray-200 bg-white text-sm'>
        <thead class='text-left bg-gray-200'>
            <tr>
                <th class='whitespace-nowrap px-4 py-2 font-medium text-gray-900 flex items-center'>
                    <span class='mr-5'>Date</span>
                    <button id='sort-toggle' hx-post='/ledger/sort' hx-target='#ledger' hx-swap='outerHTML' data-sort='{}' class='flex-col flex cursor-pointer'>
                        <svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 320 512' class='h-3 w-5 mb-[-10px]' fill='{}'><path d='{}'/></svg>
                        <svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 320 512' class='h-3 w-5' transform='rotate(180)' fill='{}'><path d='{}'/></svg>
                    </button>
                </th>
                <th class='whitespace-nowrap px-4 py-2 font-medium text-gray-900'>Description</th>
                <th class='whitespace-nowrap px-4 py-2 font-medium text-gray-900 text-right'>Amount</th>
                <th class='whitespace-nowrap px-4 py-2 font-medium text-gray-900'>Balance</th>
            </tr>
        </thead>
        <tbody class='divide-y divide-gray-200'>{}</tbody>
    </table>
</div>"#,
        ledger.sort(),
        up,
        SORT_ARROW,
        down,
        SORT_ARROW,
        rows.join("")
    )
}

/// Prev / numbered / next controls; nothing when there are no pages
pub fn render_pagination(ledger: &Ledger) -> String {
    let page_count = ledger.page_count();
    if page_count == 0 {
        return String::new();
    }

    let button = "cursor-pointer inline-flex size-8 items-center justify-center rounded border border-gray-100 bg-white text-gray-900";
    let mut items = format!(
        r#"<li><button hx-post='/ledger/paginate?delta=-1' hx-target='#ledger' hx-swap='outerHTML' class='{}'><span class='sr-only'>Prev Page</span>&lsaquo;</button></li>"#,
        button
    );

    for index in 0..page_count {
        let classes = if index == ledger.page() {
            "border-blue-600 bg-blue-600 text-white"
        } else {
            "cursor-pointer border-gray-100 bg-white text-gray-900"
        };
        items.push_str(&format!(
            r#"<li><button hx-post='/ledger/pages/{}' hx-target='#ledger' hx-swap='outerHTML' class='{} block size-8 rounded border text-center leading-8'>{}</button></li>"#,
            index,
            classes,
            index + 1
        ));
    }

    items.push_str(&format!(
        r#"<li><button hx-post='/ledger/paginate?delta=1' hx-target='#ledger' hx-swap='outerHTML' class='{}'><span class='sr-only'>Next Page</span>&rsaquo;</button></li>"#,
        button
    ));

    format!(
        r#"<div id='pagination' class='rounded-b-lg border-t border-gray-200 px-4 py-4 bg-gray-200'>
    <ol class='flex justify-end gap-1 text-xs font-medium'>{}</ol>
</div>"#,
        items
    )
}

/// The `#ledger` fragment: balance card, table, form modal, pagination and,
/// after a failed load, the error card
pub fn render_ledger(ledger: &Ledger) -> String {
    let error_card = ledger
        .load_state()
        .failure()
        .map(render_error_card)
        .unwrap_or_default();

    format!(
        r#"<div id='ledger' data-load-state='{}'>
{}
<div class='rounded-lg border border-gray-200'>
{}
{}
{}
</div>
{}
</div>"#,
        ledger.load_state(),
        render_balance_card(ledger),
        render_table(ledger),
        render_transaction_form(ledger.form()),
        render_pagination(ledger),
        error_card
    )
}
