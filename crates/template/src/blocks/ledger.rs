//! Financial ledger content

use fr_text::{format_amount_words, format_money, CurrencyNames};
use html_core::Element;

use super::{mileage_or, text_or};
use crate::config::RenderOptions;
use crate::records::{DocumentRecord, PaymentStatus};
use crate::schema::Labels;

/// Table of amounts for the record kind, with the amount in words below
pub fn ledger_block(
    record: &DocumentRecord,
    labels: &Labels,
    currency: &CurrencyNames,
    options: &RenderOptions,
) -> Element {
    let money = |amount: f64| format_money(amount, &currency.symbol);
    let mut table = Element::new("table").with_class("ledger-table");
    let mut words = None;

    match record {
        DocumentRecord::Sale(sale) => {
            table.push(amount_row(&labels.totals_caption, &money(sale.total_price)));
            table.push(amount_row("Montant versé", &money(sale.amount_paid)));
            table.push(amount_row("Reste à payer", &money(sale.balance())).with_class("balance"));
            table.push(status_row(sale.status()));
            words = Some(sale.total_price);
        }
        DocumentRecord::Purchase(purchase) => {
            table.push(amount_row(
                &labels.totals_caption,
                &money(purchase.purchase_price),
            ));
        }
        DocumentRecord::Inspection(inspection) => {
            table.push(amount_row(
                &labels.totals_caption,
                &mileage_or(inspection.mileage_reading(), &options.not_available),
            ));
        }
        DocumentRecord::Receipt(receipt) => {
            table.push(amount_row(
                &labels.totals_caption,
                &money(receipt.amount_received),
            ));
            table.push(amount_row("Total versé", &money(receipt.total_paid)));
            table.push(
                amount_row("Reste à payer", &money(receipt.remaining_balance.max(0.0)))
                    .with_class("balance"),
            );
            words = Some(receipt.amount_received);
        }
        DocumentRecord::Expense(expense) => {
            table.push(amount_row(&labels.totals_caption, &money(expense.amount)));
            table.push(amount_row(
                "Catégorie",
                &text_or(&expense.category, &options.missing_text),
            ));
            table.push(amount_row(
                "Bénéficiaire",
                &text_or(&expense.beneficiary.name, &options.missing_text),
            ));
            words = Some(expense.amount);
        }
    }

    let mut block = Element::new("div").with_class("ledger").with_child(table);
    if let Some(amount) = words {
        block.push(
            Element::new("p")
                .with_class("amount-words")
                .with_text(format!(
                    "Arrêté à la somme de : {}",
                    format_amount_words(amount, currency)
                )),
        );
    }
    block
}

fn amount_row(caption: &str, value: &str) -> Element {
    Element::new("tr")
        .with_child(Element::new("th").with_text(caption))
        .with_child(Element::new("td").with_class("amount").with_text(value))
}

fn status_row(status: PaymentStatus) -> Element {
    Element::new("tr")
        .with_child(Element::new("th").with_text("Statut"))
        .with_child(
            Element::new("td").with_child(
                Element::new("span")
                    .with_class("status")
                    .with_class(status.css_class())
                    .with_text(status.label()),
            ),
        )
}
