//! Concrete retailers that shopping cards link to

mod amazon;
mod myntra;

pub use amazon::AmazonRetailer;
pub use myntra::MyntraRetailer;

use crate::traits::Retailer;

/// Retailers in card order: fashion marketplace first, then the broad marketplace
pub fn default_retailers() -> Vec<Box<dyn Retailer>> {
    vec![Box::new(MyntraRetailer::new()), Box::new(AmazonRetailer::new())]
}
