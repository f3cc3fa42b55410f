use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Recipe {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    pub fn images(&self) -> Vec<String> {
        self.image_url.iter().cloned().collect()
    }
}

const PRODUCT_KEYS: &[&str] = &["Products", "products", "Product", "product"];
const RECIPE_KEYS: &[&str] = &["Recipes", "recipes", "Recipe", "recipe"];

/// The structured block the model embeds in its answer.
///
/// Model output is not strict about key casing or plurality, so the capitalised
/// and singular spellings are accepted and the first non-empty one wins. A
/// lone object where a list is expected counts as a one-item list.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ResultPayload {
    pub products: Vec<Product>,
    pub recipes: Vec<Recipe>,
}

impl<'de> Deserialize<'de> for ResultPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(ResultPayload {
            products: take_category(&mut fields, PRODUCT_KEYS).map_err(D::Error::custom)?,
            recipes: take_category(&mut fields, RECIPE_KEYS).map_err(D::Error::custom)?,
        })
    }
}

fn take_category<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
) -> Result<Vec<T>, serde_json::Error> {
    let value = keys
        .iter()
        .filter_map(|key| fields.remove(*key))
        .find(|value| !is_blank(value));
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items.into_iter().map(serde_json::from_value).collect(),
        Some(item) => Ok(vec![serde_json::from_value(item)?]),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResultPayload {
    pub fn new(products: Vec<Product>, recipes: Vec<Recipe>) -> ResultPayload {
        ResultPayload { products, recipes }
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn has_recipes(&self) -> bool {
        !self.recipes.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_products() && !self.has_recipes()
    }

    /// Drops exact repeats within each category, keeping the first occurrence.
    pub fn dedup(&mut self) {
        dedup_in_order(&mut self.products);
        dedup_in_order(&mut self.recipes);
    }
}

fn dedup_in_order<T: PartialEq>(items: &mut Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Text(String),
    Number(serde_json::Number),
}

fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<PriceRepr>::deserialize(deserializer)?;
    Ok(match value {
        Some(PriceRepr::Text(text)) => text,
        Some(PriceRepr::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
