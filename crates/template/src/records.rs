//! Business records rendered into documents
//!
//! Records are read-only inputs. Every field except the discriminating
//! financial amounts is optional, and missing JSON fields deserialize to
//! their defaults.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::schema::DocumentKind;

/// Client, supplier or beneficiary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// National id or trade register number
    pub id_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub plate: Option<String>,
    pub color: Option<String>,
    /// Odometer reading in km
    pub mileage: Option<u32>,
}

impl Vehicle {
    /// "Toyota Corolla" style name, if any part is known
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Ordered `name -> passed` map
///
/// Serialized as a JSON object; entries keep the key order of the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    entries: Vec<(String, bool)>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry; an existing name keeps its place
    pub fn set(&mut self, name: &str, passed: bool) -> &mut Self {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = passed,
            None => self.entries.push((name.to_string(), passed)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, passed)| *passed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|(_, p)| *p).count()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Checklist {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut checklist = Checklist::new();
        for (name, passed) in iter {
            checklist.set(&name.into(), passed);
        }
        checklist
    }
}

impl Serialize for Checklist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, passed) in &self.entries {
            map.serialize_entry(name, passed)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Checklist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChecklistVisitor;

        impl<'de> Visitor<'de> for ChecklistVisitor {
            type Value = Checklist;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of checklist item names to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Checklist, A::Error> {
                let mut checklist = Checklist::new();
                while let Some((name, passed)) = access.next_entry::<String, Option<bool>>()? {
                    checklist.set(&name, passed.unwrap_or(false));
                }
                Ok(checklist)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Checklist, E> {
                Ok(Checklist::new())
            }
        }

        deserializer.deserialize_any(ChecklistVisitor)
    }
}

/// Payment status of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Debt,
}

impl PaymentStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            PaymentStatus::Completed => "status-completed",
            PaymentStatus::Debt => "status-debt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Completed => "Soldé",
            PaymentStatus::Debt => "Dette",
        }
    }
}

/// Never-negative remaining balance
pub fn remaining_balance(total: f64, paid: f64) -> f64 {
    (total - paid).max(0.0)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleRecord {
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
    pub client: Party,
    pub vehicle: Vehicle,
    pub total_price: f64,
    pub amount_paid: f64,
    pub payment_method: Option<String>,
}

impl SaleRecord {
    /// `max(0, total_price - amount_paid)`
    pub fn balance(&self) -> f64 {
        remaining_balance(self.total_price, self.amount_paid)
    }

    pub fn status(&self) -> PaymentStatus {
        if self.balance() > 0.0 {
            PaymentStatus::Debt
        } else {
            PaymentStatus::Completed
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseRecord {
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
    pub supplier: Party,
    pub vehicle: Vehicle,
    /// Acquisition cost
    pub purchase_price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionRecord {
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
    pub client: Party,
    pub vehicle: Vehicle,
    /// Mileage reading at inspection time (falls back to the vehicle's)
    pub mileage: Option<u32>,
    pub inspector: Option<String>,
    pub notes: Option<String>,
    pub safety: Checklist,
    pub equipment: Checklist,
    pub comfort: Checklist,
}

impl InspectionRecord {
    pub fn mileage_reading(&self) -> Option<u32> {
        self.mileage.or(self.vehicle.mileage)
    }

    /// The vehicle with its odometer set to the inspection reading
    pub fn inspected_vehicle(&self) -> Vehicle {
        Vehicle {
            mileage: self.mileage_reading(),
            ..self.vehicle.clone()
        }
    }
}

/// Projection of one payment against a sale
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptRecord {
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
    pub client: Party,
    pub vehicle: Vehicle,
    pub sale_reference: Option<String>,
    /// Amount received in this transaction
    pub amount_received: f64,
    /// Cumulative amount paid, this transaction included
    pub total_paid: f64,
    pub remaining_balance: f64,
}

impl ReceiptRecord {
    /// Receipt for a payment made against `sale`
    ///
    /// `sale.amount_paid` is the amount paid before this payment.
    pub fn from_sale_payment(sale: &SaleRecord, amount: f64, date: Option<NaiveDate>) -> Self {
        let total_paid = sale.amount_paid + amount;
        Self {
            reference: None,
            date,
            client: sale.client.clone(),
            vehicle: sale.vehicle.clone(),
            sale_reference: sale.reference.clone(),
            amount_received: amount,
            total_paid,
            remaining_balance: remaining_balance(sale.total_price, total_paid),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseRecord {
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub beneficiary: Party,
    pub amount: f64,
}

/// Any printable business record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentRecord {
    Sale(SaleRecord),
    Purchase(PurchaseRecord),
    Inspection(InspectionRecord),
    Receipt(ReceiptRecord),
    Expense(ExpenseRecord),
}

impl DocumentRecord {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRecord::Sale(_) => DocumentKind::Sale,
            DocumentRecord::Purchase(_) => DocumentKind::Purchase,
            DocumentRecord::Inspection(_) => DocumentKind::Inspection,
            DocumentRecord::Receipt(_) => DocumentKind::Receipt,
            DocumentRecord::Expense(_) => DocumentKind::Expense,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            DocumentRecord::Sale(r) => r.reference.as_deref(),
            DocumentRecord::Purchase(r) => r.reference.as_deref(),
            DocumentRecord::Inspection(r) => r.reference.as_deref(),
            DocumentRecord::Receipt(r) => r.reference.as_deref(),
            DocumentRecord::Expense(r) => r.reference.as_deref(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DocumentRecord::Sale(r) => r.date,
            DocumentRecord::Purchase(r) => r.date,
            DocumentRecord::Inspection(r) => r.date,
            DocumentRecord::Receipt(r) => r.date,
            DocumentRecord::Expense(r) => r.date,
        }
    }

    /// Client, supplier or beneficiary
    pub fn partner(&self) -> &Party {
        match self {
            DocumentRecord::Sale(r) => &r.client,
            DocumentRecord::Purchase(r) => &r.supplier,
            DocumentRecord::Inspection(r) => &r.client,
            DocumentRecord::Receipt(r) => &r.client,
            DocumentRecord::Expense(r) => &r.beneficiary,
        }
    }

    /// Vehicle concerned, if the record is about one
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            DocumentRecord::Sale(r) => Some(&r.vehicle),
            DocumentRecord::Purchase(r) => Some(&r.vehicle),
            DocumentRecord::Inspection(r) => Some(&r.vehicle),
            DocumentRecord::Receipt(r) => Some(&r.vehicle),
            DocumentRecord::Expense(_) => None,
        }
    }
}
