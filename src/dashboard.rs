//! Dashboard controller
//!
//! Owns the user's selections and the three result slots (historical,
//! predictions, comparison), and orchestrates calls to the prediction
//! service. Slots are written only through their request tokens, so a
//! response from a superseded request can never overwrite a newer one.

use tracing::{info, warn};

use crate::accuracy;
use crate::chart;
use crate::client::PredictionClient;
use crate::series::{self, Anchor, ChartPoint, ComparisonPoint};
use crate::state::{Selections, Slot, StateError, View};

/// Native view-state controller for the water-level dashboard
pub struct Dashboard {
    client: PredictionClient,
    selections: Selections,
    cities: Vec<String>,
    historical: Slot<Vec<ChartPoint>>,
    predictions: Slot<Vec<ChartPoint>>,
    comparison: Slot<Vec<ComparisonPoint>>,
}

impl Dashboard {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            selections: Selections::new(),
            cities: Vec::new(),
            historical: Slot::new(),
            predictions: Slot::new(),
            comparison: Slot::new(),
        }
    }

    /// Fetch the city list and select the first city if none is selected
    ///
    /// Selecting a city triggers the historical fetch for it.
    pub async fn load_cities(&mut self) -> Result<(), crate::client::ClientError> {
        let cities = self.client.list_cities().await?;
        info!(count = cities.len(), "Loaded city list");
        self.cities = cities;

        if self.selections.city().is_none() {
            if let Some(first) = self.cities.first().cloned() {
                self.select_city(&first).await;
            }
        }
        Ok(())
    }

    /// Change the selected city, refreshing its historical series
    pub async fn select_city(&mut self, city: &str) {
        if self.selections.select_city(city) {
            self.refresh_historical().await;
        }
    }

    /// Re-fetch the historical series for the current selection
    pub async fn refresh_historical(&mut self) {
        let Some(city) = self.selections.city().map(str::to_string) else {
            return;
        };
        let window = self.selections.days_to_predict() as usize;

        let token = self.historical.begin();
        let result = self
            .client
            .fetch_historical(&city)
            .await
            .map(|records| series::historical_series(&records, &city, window, Anchor::Tail))
            .map_err(|e| e.to_string());

        if !self.historical.complete(token, result) {
            warn!(%city, "Discarded superseded historical response");
        }
    }

    /// Request a forecast for the selected city
    ///
    /// The forecast and its historical context are fetched concurrently;
    /// both series are trimmed to the current forecast horizon (historical
    /// from the tail, predictions from the head), so the chart shows N days
    /// of context followed by N predicted days.
    pub async fn run_prediction(&mut self) {
        let Some(city) = self.selections.city().map(str::to_string) else {
            return;
        };
        let days = self.selections.days_to_predict();
        let window = days as usize;

        let prediction_token = self.predictions.begin();
        let historical_token = self.historical.begin();

        let (prediction, historical) = tokio::join!(
            self.client.request_prediction(&city, days),
            self.client.fetch_historical(&city),
        );

        let prediction_result = prediction
            .map(|points| series::prediction_series(&points, window, Anchor::Head))
            .map_err(|e| e.to_string());
        let historical_result = historical
            .map(|records| series::historical_series(&records, &city, window, Anchor::Tail))
            .map_err(|e| e.to_string());

        if !self.predictions.complete(prediction_token, prediction_result) {
            warn!(%city, "Discarded superseded prediction response");
        }
        if !self.historical.complete(historical_token, historical_result) {
            warn!(%city, "Discarded superseded historical response");
        }
    }

    /// Request a prediction/actual comparison for the selected city
    pub async fn run_comparison(&mut self) {
        let Some(city) = self.selections.city().map(str::to_string) else {
            return;
        };
        let test_days = self.selections.test_days();

        let token = self.comparison.begin();
        let result = self
            .client
            .request_comparison(&city, test_days)
            .await
            .map(|points| series::comparison_window(&points, test_days as usize))
            .map_err(|e| e.to_string());

        if !self.comparison.complete(token, result) {
            warn!(%city, "Discarded superseded comparison response");
        }
    }

    // ============================================
    // Selections
    // ============================================

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn set_days_to_predict(&mut self, days: u16) -> Result<(), StateError> {
        self.selections.set_days_to_predict(days)
    }

    pub fn set_test_days(&mut self, days: u16) -> Result<(), StateError> {
        self.selections.set_test_days(days)
    }

    pub fn set_view(&mut self, view: View) {
        self.selections.set_view(view);
    }

    // ============================================
    // View models
    // ============================================

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn historical(&self) -> &Slot<Vec<ChartPoint>> {
        &self.historical
    }

    pub fn predictions(&self) -> &Slot<Vec<ChartPoint>> {
        &self.predictions
    }

    pub fn comparison(&self) -> &Slot<Vec<ComparisonPoint>> {
        &self.comparison
    }

    /// Historical context followed by the forecast, as one chart series
    pub fn combined_series(&self) -> Vec<ChartPoint> {
        series::merge_series(
            self.historical.data().cloned().unwrap_or_default(),
            self.predictions.data().cloned().unwrap_or_default(),
        )
    }

    /// Axis domain for the prediction chart
    pub fn prediction_domain(&self) -> (f64, f64) {
        chart::chart_domain(&self.combined_series())
    }

    /// Axis domain for the comparison chart
    pub fn comparison_domain(&self) -> (f64, f64) {
        chart::comparison_domain(self.comparison.data().map_or(&[][..], Vec::as_slice))
    }

    /// Model accuracy over the current comparison, in percent
    pub fn accuracy(&self) -> f64 {
        accuracy::summarize_accuracy(self.comparison.data().map_or(&[][..], Vec::as_slice))
    }

    /// Mean forecast level over the current prediction series
    pub fn mean_predicted_level(&self) -> f64 {
        accuracy::mean_level(self.predictions.data().map_or(&[][..], Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::state::Phase;

    fn unreachable_dashboard() -> Dashboard {
        // Nothing listens on the discard port; requests fail fast.
        Dashboard::new(PredictionClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 500,
        }))
    }

    #[tokio::test]
    async fn test_fetches_without_a_city_are_no_ops() {
        let mut dashboard = unreachable_dashboard();
        dashboard.run_prediction().await;
        dashboard.run_comparison().await;
        dashboard.refresh_historical().await;

        assert_eq!(dashboard.historical().phase(), Phase::Idle);
        assert_eq!(dashboard.predictions().phase(), Phase::Idle);
        assert_eq!(dashboard.comparison().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failed_fetch_marks_slot_failed() {
        let mut dashboard = unreachable_dashboard();
        dashboard.select_city("caicara").await;

        assert_eq!(dashboard.historical().phase(), Phase::Failed);
        assert!(dashboard.historical().error().is_some());
        // Other slots are untouched
        assert_eq!(dashboard.predictions().phase(), Phase::Idle);

        dashboard.run_prediction().await;
        assert_eq!(dashboard.predictions().phase(), Phase::Failed);
    }

    #[tokio::test]
    async fn test_view_models_degrade_to_defaults() {
        let dashboard = unreachable_dashboard();
        assert!(dashboard.combined_series().is_empty());
        assert_eq!(dashboard.prediction_domain(), chart::DEFAULT_DOMAIN);
        assert_eq!(dashboard.comparison_domain(), chart::DEFAULT_DOMAIN);
        assert_eq!(dashboard.accuracy(), 0.0);
        assert_eq!(dashboard.mean_predicted_level(), 0.0);
    }

    #[tokio::test]
    async fn test_selection_delegation() {
        let mut dashboard = unreachable_dashboard();
        assert!(dashboard.set_days_to_predict(10).is_ok());
        assert!(dashboard.set_days_to_predict(0).is_err());
        assert_eq!(dashboard.selections().days_to_predict(), 10);

        dashboard.set_view(View::Compare);
        assert_eq!(dashboard.selections().view(), View::Compare);
    }
}
