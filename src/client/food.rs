//! Food dictionaries and dish management

use super::{endpoints, payload, ApiClient, ApiResponse};
use crate::error::Result;
use crate::models::{Dish, DishFilter};

impl ApiClient {
    pub async fn food_categories(&self) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(endpoints::FOOD_CATEGORIES, headers).await
    }

    pub async fn tags(&self) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(endpoints::FOOD_TAGS, headers).await
    }

    pub async fn antitags(&self) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(endpoints::FOOD_ANTITAGS, headers).await
    }

    /// Menu filtered by tags, antitags and category
    pub async fn dishes(&self, filter: &DishFilter) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let path = format!("{}{}", endpoints::FOOD_MENU, filter.to_query());
        self.executor.get(&path, headers).await
    }

    pub async fn create_dish(&self, dish: &Dish) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let body = payload(dish)?;
        self.executor.post(endpoints::FOOD_CREATE, headers, &body).await
    }

    pub async fn dish(&self, dish_id: i64) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(&endpoints::dish(dish_id), headers).await
    }

    /// Update a dish; which fields are applied is up to the server
    pub async fn update_dish(&self, dish_id: i64, dish: &Dish) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let body = payload(dish)?;
        self.executor
            .patch(&endpoints::dish(dish_id), headers, &body)
            .await
    }
}
