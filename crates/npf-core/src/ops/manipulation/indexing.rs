//! Elementwise selection

use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{IxDyn, Zip};

/// Select elements from `x` where `condition` is true and from `y` elsewhere.
///
/// All three operands are broadcast against each other; the result has the
/// broadcast shape.
pub fn where_op<T>(condition: &Tensor<bool>, x: &Tensor<T>, y: &Tensor<T>) -> Result<Tensor<T>>
where
    T: Clone,
{
    let xy_broadcast_shape = x.shape().broadcast_shape(y.shape()).ok_or_else(|| {
        TensorError::shape_mismatch(
            "where_op",
            &format!("shape broadcastable with {}", x.shape()),
            &y.shape().to_string(),
        )
    })?;

    let broadcast_shape = condition
        .shape()
        .broadcast_shape(&xy_broadcast_shape)
        .ok_or_else(|| {
            TensorError::shape_mismatch(
                "where_op",
                &format!("condition broadcastable to {xy_broadcast_shape}"),
                &condition.shape().to_string(),
            )
        })?;

    tracing::trace!(
        condition = %condition.shape(),
        x = %x.shape(),
        y = %y.shape(),
        out = %broadcast_shape,
        "where_op"
    );

    let out = IxDyn(broadcast_shape.dims());
    let broadcast_failed = || {
        TensorError::invalid_shape(
            "where_op",
            format!("Broadcasting to {broadcast_shape} failed"),
            None,
        )
    };
    let cond = condition
        .array()
        .broadcast(out.clone())
        .ok_or_else(broadcast_failed)?;
    let xs = x.array().broadcast(out.clone()).ok_or_else(broadcast_failed)?;
    let ys = y.array().broadcast(out).ok_or_else(broadcast_failed)?;

    let result = Zip::from(cond)
        .and(xs)
        .and(ys)
        .map_collect(|&c, xv, yv| if c { xv.clone() } else { yv.clone() });

    Ok(Tensor::from_array(result))
}
