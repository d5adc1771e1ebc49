//! Seeds the database with transactions downloaded from a JSON fixture.

use crate::Error;

use super::core::Transaction;

/// Download the JSON array of transactions at `url`.
///
/// # Errors
/// Returns an [Error::FixtureFetch] if the request fails, the server
/// responds with an error status, or the body is not an array of transactions.
pub async fn fetch_fixture(client: &reqwest::Client, url: &str) -> Result<Vec<Transaction>, Error> {
    tracing::debug!("Downloading seed data from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|error| Error::FixtureFetch(error.to_string()))?;

    response
        .json::<Vec<Transaction>>()
        .await
        .map_err(|error| Error::FixtureFetch(error.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        test_utils::{UNREACHABLE_FIXTURE_URL, spawn_fixture_server},
    };

    use super::fetch_fixture;

    #[tokio::test]
    async fn downloads_transactions() {
        let url = spawn_fixture_server(json!([
            {
                "id": 1,
                "title": "Backpack",
                "price": 109.95,
                "description": "Fits 15 inch laptops",
                "category": "men's clothing",
                "image": "https://example.com/bag.jpg",
                "sold": false,
                "dateOfSale": "2021-11-27T20:29:54+05:30"
            },
            {
                "id": 2,
                "title": "T-Shirt",
                "price": 22.3,
                "description": "Slim fit",
                "category": "men's clothing",
                "sold": true,
                "dateOfSale": "2021-10-27T20:29:54+05:30"
            }
        ]))
        .await;

        let transactions = fetch_fixture(&reqwest::Client::new(), &url)
            .await
            .expect("Could not fetch fixture");

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].title, "Backpack");
        assert_eq!(transactions[1].image, None);
    }

    #[tokio::test]
    async fn rejects_body_that_is_not_a_list_of_transactions() {
        let url = spawn_fixture_server(json!({ "transactions": [] })).await;

        let result = fetch_fixture(&reqwest::Client::new(), &url).await;

        assert!(
            matches!(result, Err(Error::FixtureFetch(_))),
            "want fixture fetch error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reports_unreachable_server() {
        let result = fetch_fixture(&reqwest::Client::new(), UNREACHABLE_FIXTURE_URL).await;

        assert!(
            matches!(result, Err(Error::FixtureFetch(_))),
            "want fixture fetch error, got {result:?}"
        );
    }
}
