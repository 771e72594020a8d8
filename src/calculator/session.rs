//! Calculator session: ties the engine to the input store.

use tracing::{info, warn};

use crate::calculator::CalculatorInputs;
use crate::persistence::{InputStore, StoreError};
use crate::pricing::{self, check_shares, normalize_shares, PriceBreakdown, ShareError};
use crate::types::PaymentMode;

pub struct Calculator {
    store: Box<dyn InputStore>,
    defaults: CalculatorInputs,
}

impl Calculator {
    pub fn new(store: Box<dyn InputStore>, defaults: CalculatorInputs) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &CalculatorInputs {
        &self.defaults
    }

    /// Last saved inputs, or the defaults when nothing usable is stored
    pub fn load(&self) -> CalculatorInputs {
        match self.store.load() {
            Ok(Some(record)) => CalculatorInputs::from_record(&record, &self.defaults),
            Ok(None) => self.defaults,
            Err(e) => {
                warn!("⚠️ Could not load saved inputs, using defaults: {}", e);
                self.defaults
            }
        }
    }

    /// Price `inputs` and remember them.
    ///
    /// Inputs are only saved when a finite price came out. A failing store
    /// is logged and does not affect the result.
    pub fn calculate(&self, inputs: &CalculatorInputs) -> PriceBreakdown {
        let breakdown = pricing::price(&inputs.pricing_inputs());

        if breakdown.is_priced() {
            if let Err(e) = self.store.save(&inputs.to_record()) {
                warn!("⚠️ Could not save inputs: {}", e);
            }
        }

        breakdown
    }

    /// Forget saved inputs and return the defaults
    pub fn reset(&self) -> Result<CalculatorInputs, StoreError> {
        self.store.clear()?;
        info!("🔄 Inputs reset to defaults");
        Ok(self.defaults)
    }

    /// Inputs with payment shares rescaled to 100%
    pub fn normalize(&self, inputs: &CalculatorInputs) -> Result<CalculatorInputs, ShareError> {
        let shares = normalize_shares(&inputs.shares)?;
        Ok(CalculatorInputs { shares, ..*inputs })
    }

    /// Normalize shares, then price and save the result.
    ///
    /// A refused normalization leaves inputs untouched and prices nothing.
    pub fn normalize_and_calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<(CalculatorInputs, PriceBreakdown), ShareError> {
        let normalized = self.normalize(inputs)?;
        info!("📊 Shares normalized to 100%");
        let breakdown = self.calculate(&normalized);
        Ok((normalized, breakdown))
    }

    /// Warning text when mix-mode shares do not add up to 100%
    pub fn share_warning(&self, inputs: &CalculatorInputs) -> Option<String> {
        if inputs.mode != PaymentMode::Mix {
            return None;
        }
        let check = check_shares(&inputs.shares);
        if check.balanced {
            None
        } else {
            Some(format!("⚠️ Payment shares sum to {:.2}% (should be 100%)", check.total))
        }
    }
}
