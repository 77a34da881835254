//! Discovery orchestration.
//!
//! One request flows INITIAL_SEARCH → EVALUATE → (DONE | EXPANDING) →
//! EVALUATE → DONE. All state is request-scoped inside [`RunState`];
//! nothing survives the call, and concurrent requests never share a
//! working set.

use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, StreamExt};

use shopscout_core::{AppConfig, PriceBands, Product, RetailerRegistry};
use shopscout_extract::Hydrator;
use shopscout_search::{SearchClient, SearchTarget, MAX_PAGE_SIZE};

use crate::bands::{bands_from_products, fallback_bands, slice_tiers, TierSlices};
use crate::dedup::{ProductDedup, TargetDedup};
use crate::error::EngineError;
use crate::expander::QueryExpander;
use crate::expansion::build_jobs;
use crate::intent;
use crate::types::{DiscoveryRequest, DiscoveryResponse};

pub struct DiscoveryEngine {
    pub(crate) search: SearchClient,
    pub(crate) hydrator: Hydrator,
    pub(crate) expander: QueryExpander,
    pub(crate) registry: RetailerRegistry,
    pub(crate) dispatch_concurrency: usize,
    pub(crate) min_yield: usize,
}

/// Request-scoped working set. The target seen-set sits behind a mutex
/// because expansion tasks consult it concurrently before fetching;
/// products, bands, and slices are only ever touched by the serial
/// reducer.
pub(crate) struct RunState {
    pub(crate) target_dedup: Arc<Mutex<TargetDedup>>,
    product_dedup: ProductDedup,
    products: Vec<Product>,
    pub(crate) bands: PriceBands,
    pub(crate) slices: TierSlices,
}

impl RunState {
    fn new(budget: f64) -> Self {
        Self {
            target_dedup: Arc::new(Mutex::new(TargetDedup::new())),
            product_dedup: ProductDedup::new(),
            products: Vec::new(),
            bands: fallback_bands(budget),
            slices: TierSlices::default(),
        }
    }

    /// Serial reducer step: dedup the batch into the running product
    /// list, then recompute bands and tier slices from scratch. Live
    /// bands replace the budget bootstrap entirely the moment any priced
    /// product exists.
    pub(crate) fn absorb(&mut self, batch: Vec<Product>) {
        let fresh = self.product_dedup.retain_new(batch);
        self.products.extend(fresh);
        if let Some(live) = bands_from_products(&self.products) {
            self.bands = live;
        }
        self.slices = slice_tiers(&self.products, &self.bands);
    }

    pub(crate) fn dedup_targets(&self, targets: Vec<SearchTarget>) -> Vec<SearchTarget> {
        self.target_dedup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain_new(targets)
    }

    fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl DiscoveryEngine {
    pub fn new(
        search: SearchClient,
        hydrator: Hydrator,
        expander: QueryExpander,
        registry: RetailerRegistry,
        dispatch_concurrency: usize,
        min_yield: usize,
    ) -> Self {
        Self {
            search,
            hydrator,
            expander,
            registry,
            dispatch_concurrency: dispatch_concurrency.max(1),
            min_yield,
        }
    }

    /// Builds the engine from application config and a loaded retailer
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if any underlying HTTP client cannot be
    /// constructed.
    pub fn from_config(
        config: &AppConfig,
        registry: RetailerRegistry,
    ) -> Result<Self, EngineError> {
        let search = SearchClient::new(
            &config.search_api_key,
            &config.search_engine_id,
            config.search_timeout_secs,
            &config.user_agent,
        )?;
        let hydrator = Hydrator::new(
            registry.clone(),
            &config.user_agent,
            config.page_timeout_secs,
            config.robots_timeout_secs,
            config.hydrate_concurrency,
        )?;
        let expander = QueryExpander::new(
            config.expander_api_key.clone(),
            &config.expander_model,
            config.search_timeout_secs,
        )?;
        Ok(Self::new(
            search,
            hydrator,
            expander,
            registry,
            config.dispatch_concurrency,
            config.min_yield,
        ))
    }

    /// Runs one full discovery: expand queries, search, hydrate, band,
    /// slice, and — when the tiered yield is short — broaden through the
    /// bounded expansion wave.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AllQueriesFailed`] when every initial query
    /// task failed upstream. Individual query failures and hydration
    /// skips only reduce yield.
    pub async fn discover(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<DiscoveryResponse, EngineError> {
        let budget = request.budget();
        let intent = intent::classify(&request.description);
        let scope = self.request_scope(request);
        let single_retailer = match scope.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        };

        let queries = self
            .expander
            .expand(&request.description, budget, &intent, single_retailer)
            .await;

        tracing::info!(
            intent = %intent,
            queries = queries.len(),
            scope = scope.len(),
            image = request.image,
            "starting discovery"
        );

        let mut state = RunState::new(budget);

        // INITIAL_SEARCH: every query against the scope at offset 1, then
        // one hydration pass over the deduplicated targets.
        let targets = self
            .initial_search(&queries, &scope, request.image, &state)
            .await?;
        let batch = self.hydrator.hydrate_batch(&targets).await;
        state.absorb(batch.products);

        // EVALUATE: short yield moves to EXPANDING; the wave re-evaluates
        // after every task and stops dispatching once satisfied.
        if state.slices.len() < self.min_yield {
            let jobs = build_jobs(&scope, &queries);
            tracing::info!(
                tier_yield = state.slices.len(),
                min_yield = self.min_yield,
                jobs = jobs.len(),
                "yield below threshold — expanding"
            );
            self.run_expansion(jobs, request.image, &mut state).await;
        }

        // DONE: best effort, whatever yield was achieved.
        let all_count = state.product_count();
        tracing::info!(
            tier_yield = state.slices.len(),
            products = all_count,
            "discovery finished"
        );

        Ok(DiscoveryResponse {
            bands: state.bands,
            low: state.slices.low,
            mid: state.slices.mid,
            high: state.slices.high,
            all_count,
            priced_count: all_count,
            intent,
            ikea_only: request.ikea_only,
            retailers: scope,
        })
    }

    /// Dispatches all expander queries concurrently (bounded) and reduces
    /// their targets through the seen-set. A query task failing upstream
    /// loses only its own contribution — unless every task failed, which
    /// escalates.
    async fn initial_search(
        &self,
        queries: &[String],
        scope: &[String],
        image_mode: bool,
        state: &RunState,
    ) -> Result<Vec<SearchTarget>, EngineError> {
        let outcomes: Vec<_> = stream::iter(queries.iter().cloned())
            .map(|query| async move {
                self.search
                    .search(&query, MAX_PAGE_SIZE, scope, image_mode, 1)
                    .await
            })
            .buffer_unordered(self.dispatch_concurrency)
            .collect()
            .await;

        let attempted = outcomes.len();
        let mut failures = 0usize;
        let mut targets = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(found) => targets.extend(found),
                Err(e) => {
                    tracing::warn!(error = %e, "initial query task failed");
                    failures += 1;
                }
            }
        }

        if attempted > 0 && failures == attempted {
            return Err(EngineError::AllQueriesFailed { attempted });
        }

        Ok(state.dedup_targets(targets))
    }

    /// The retailer scope for this request: the explicit override when
    /// given, else the primary retailer alone or the registry's widening
    /// order.
    fn request_scope(&self, request: &DiscoveryRequest) -> Vec<String> {
        if let Some(retailers) = &request.retailers {
            if !retailers.is_empty() {
                return retailers.clone();
            }
        }
        if request.ikea_only {
            self.registry.primary_host().into_iter().collect()
        } else {
            self.registry.widening_order()
        }
    }
}
