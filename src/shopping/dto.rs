use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpsertShoppingListRequest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_default_to_empty() {
        let req: UpsertShoppingListRequest =
            serde_json::from_str(r#"{"name": "weekly"}"#).unwrap();
        assert!(req.items.is_empty());
    }
}
