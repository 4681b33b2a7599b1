//! Shopping (`itens_mercado`) and pharmacy (`itens_farmacia`) list items.

use crate::model::collection::Record;
use serde::{Deserialize, Serialize};

/// The three fixed shopping buckets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ShoppingCategory {
    #[serde(rename = "Compra do mês")]
    Monthly,
    /// Preselected in the item form.
    #[default]
    #[serde(rename = "Compra da semana")]
    Weekly,
    #[serde(rename = "Compra de necessidade")]
    AsNeeded,
}

impl ShoppingCategory {
    pub const ALL: [ShoppingCategory; 3] = [Self::Monthly, Self::Weekly, Self::AsNeeded];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Compra do mês",
            Self::Weekly => "Compra da semana",
            Self::AsNeeded => "Compra de necessidade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Free text ("2kg", "3 caixas").
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: ShoppingCategory,
    #[serde(default)]
    pub collected: bool,
}

impl Record for ShoppingItem {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
}

impl Record for PharmacyItem {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Form input shared by both lists. `id = Some(..)` edits an existing item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub id: Option<String>,
    pub name: String,
    pub quantity: String,
    /// Ignored by the pharmacy list.
    pub category: ShoppingCategory,
}
