use crate::{AppError, AppState};

pub async fn update_stores(
    state: &AppState,
    incoming: Vec<String>,
) -> Result<Vec<String>, AppError> {
    let stores = normalize_store_list(incoming);
    if stores.is_empty() {
        return Err(AppError::BadRequest(
            "store list must not be empty".to_string(),
        ));
    }
    state
        .store_list
        .save_stores(&state.config.stores_path, &stores)
        .await?;
    *state.stores.write().await = stores.clone();
    Ok(stores)
}

pub fn normalize_store_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_list_is_trimmed_sorted_and_deduped() {
        let stores = normalize_store_list(vec![
            " North Canteen ".to_string(),
            "Cafe West".to_string(),
            "North Canteen".to_string(),
            "  ".to_string(),
        ]);
        assert_eq!(stores, vec!["Cafe West", "North Canteen"]);
    }
}
