mod curve_point;
mod liquidity_model;
mod pool;
mod slippage_model;
mod weight_model;

pub use curve_point::{
    LiquidityPoint, MaxWeightPoint, RatioDiff0Point, RatioDiff0Sample, SlippagePoint,
};
pub use liquidity_model::LiquidityModel;
pub use pool::{Pool, PoolId, scores as pool_scores};
pub use slippage_model::SlippageModel;
pub use weight_model::WeightModel;
