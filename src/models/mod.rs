//! Domain models shared across the endpoint clients and the dashboard.
//!
//! The backend speaks Portuguese field names; serde renames keep the wire
//! contract intact while the Rust side stays idiomatic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// Payload for registering or updating a product.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Bebidas,
    Lanches,
    Doces,
}

/// An employee on the canteen's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// One line of a recorded sale, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(rename = "nomeProduto")]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "valor")]
    pub value: f64,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(rename = "nomeFuncionario")]
    pub employee_name: String,
    #[serde(rename = "pagamento")]
    pub payment: PaymentMethod,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "itens")]
    pub items: Vec<SaleItem>,
}

/// Payload for registering a sale.
#[derive(Debug, Clone, Serialize)]
pub struct NewSale {
    #[serde(rename = "idFuncionario")]
    pub employee_id: String,
    #[serde(rename = "pagamento")]
    pub payment: PaymentMethod,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "produtos")]
    pub products: Vec<NewSaleItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSaleItem {
    #[serde(rename = "idProduto")]
    pub product_id: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// Payment methods accepted at the register. Wire values match the
/// backend's labels verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Desconto em folha")]
    Payroll,
    #[serde(rename = "Pix")]
    Pix,
    #[serde(rename = "Débito")]
    Debit,
    #[serde(rename = "Crédito")]
    Credit,
}

/// A stock arrival (entrada): quantity of a product added to inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: String,
    #[serde(rename = "nomeProduto")]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
}

/// Payload for registering a stock arrival.
#[derive(Debug, Clone, Serialize)]
pub struct NewStockEntry {
    #[serde(rename = "produtoId")]
    pub product_id: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
}

/// One row of the per-employee spending report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSpending {
    #[serde(rename = "idFuncionario")]
    pub employee_id: String,
    #[serde(rename = "nomeFuncionario")]
    pub employee_name: String,
    #[serde(rename = "valorTotalGasto")]
    pub total_spent: f64,
}

/// A dated monetary entry used by the dashboard. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
}

impl FinancialRecord {
    pub fn new(date: NaiveDate, amount: f64, frequency: Frequency) -> Self {
        Self {
            date,
            amount,
            frequency,
        }
    }

    /// True when the record falls within the given calendar month.
    pub fn in_month(&self, month: u32, year: i32) -> bool {
        use chrono::Datelike;
        self.date.month() == month && self.date.year() == year
    }
}

/// Distinguishes recurring obligations from one-off entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "recorrente")]
    Recurring,
    #[serde(rename = "eventual")]
    Eventual,
}
