//! Axis resolution for lower-rank masks
//!
//! A mask of rank `m` applied to an array of rank `r >= m` covers `m` of the
//! array's axes (the *mask axes*) and is broadcast uniformly across the other
//! `r - m` (the *non-mask axes*). Callers name either side of that split, or
//! neither when the ranks are equal; [`process_mask_axis`] turns that choice
//! into a canonical [`AxisSet`].

use npf_core::ops::reduction::normalize_axis;
use npf_core::{ErrorContext, Result, TensorError};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

macro_rules! scalar_or_sequence {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub enum $name {
            One($elem),
            Many(Vec<$elem>),
        }

        impl $name {
            pub fn len(&self) -> usize {
                match self {
                    Self::One(_) => 1,
                    Self::Many(values) => values.len(),
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// The values as a sequence; a scalar becomes a one-element vector.
            pub fn to_vec(&self) -> Vec<$elem> {
                match self {
                    Self::One(value) => vec![*value],
                    Self::Many(values) => values.clone(),
                }
            }
        }

        impl From<$elem> for $name {
            fn from(value: $elem) -> Self {
                Self::One(value)
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(values: Vec<$elem>) -> Self {
                Self::Many(values)
            }
        }

        impl From<&[$elem]> for $name {
            fn from(values: &[$elem]) -> Self {
                Self::Many(values.to_vec())
            }
        }

        impl<const N: usize> From<[$elem; N]> for $name {
            fn from(values: [$elem; N]) -> Self {
                Self::Many(values.to_vec())
            }
        }
    };
}

scalar_or_sequence!(
    /// One axis index or a sequence of them. Negative indices count from the end.
    Axes,
    i32
);

scalar_or_sequence!(
    /// One repeat count or a sequence of them, paired with [`Axes`].
    Repeats,
    usize
);

/// Which side of the mask/non-mask split the caller names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AxisSpec {
    /// Mask and array have equal rank; every axis is a mask axis.
    #[default]
    Unspecified,
    /// Array axes the mask's dimensions map onto.
    MaskAxis(Axes),
    /// Array axes the mask is broadcast across.
    NonMaskAxis(Axes),
}

impl AxisSpec {
    pub fn mask_axis(axes: impl Into<Axes>) -> Self {
        Self::MaskAxis(axes.into())
    }

    pub fn non_mask_axis(axes: impl Into<Axes>) -> Self {
        Self::NonMaskAxis(axes.into())
    }

    /// Build a spec from two optional axis arguments, at most one of which may be set.
    pub fn from_options(mask_axis: Option<Axes>, non_mask_axis: Option<Axes>) -> Result<Self> {
        match (mask_axis, non_mask_axis) {
            (None, None) => Ok(Self::Unspecified),
            (Some(axes), None) => Ok(Self::MaskAxis(axes)),
            (None, Some(axes)) => Ok(Self::NonMaskAxis(axes)),
            (Some(_), Some(_)) => Err(TensorError::invalid_configuration(
                "process_mask_axis",
                "only one of mask_axis/non_mask_axis may be given".to_string(),
            )),
        }
    }
}

/// Resolved partition of an array's axes.
///
/// Both lists are sorted ascending, disjoint, and together cover
/// `0..rank` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AxisSet {
    mask_axis: Vec<usize>,
    non_mask_axis: Vec<usize>,
}

impl AxisSet {
    fn from_mask_axis(mask_axis: Vec<usize>, rank: usize) -> Self {
        let non_mask_axis = complement(&mask_axis, rank);
        Self {
            mask_axis,
            non_mask_axis,
        }
    }

    fn from_non_mask_axis(non_mask_axis: Vec<usize>, rank: usize) -> Self {
        let mask_axis = complement(&non_mask_axis, rank);
        Self {
            mask_axis,
            non_mask_axis,
        }
    }

    pub fn mask_axis(&self) -> &[usize] {
        &self.mask_axis
    }

    pub fn non_mask_axis(&self) -> &[usize] {
        &self.non_mask_axis
    }

    /// Rank of the array this set partitions.
    pub fn rank(&self) -> usize {
        self.mask_axis.len() + self.non_mask_axis.len()
    }
}

fn complement(axes: &[usize], rank: usize) -> Vec<usize> {
    (0..rank).filter(|d| axes.binary_search(d).is_err()).collect()
}

/// Normalize, sort and deduplicate-check a caller-supplied axis list.
fn canonical_axes(axes: &Axes, rank: usize, argument: &str) -> Result<Vec<usize>> {
    let mut normalized = axes
        .to_vec()
        .into_iter()
        .map(|d| normalize_axis(d, rank))
        .collect::<Result<Vec<_>>>()?;
    normalized.sort_unstable();

    if let Some(pair) = normalized.windows(2).find(|w| w[0] == w[1]) {
        return Err(TensorError::invalid_configuration(
            "process_mask_axis",
            format!("{argument} names axis {} more than once: {:?}", pair[0], axes.to_vec()),
        ));
    }
    Ok(normalized)
}

/// Resolve which axes of an array of rank `array_rank` a mask of rank
/// `mask_rank` covers.
///
/// # Errors
/// * Shape error when the ranks are unequal and no axes are given, when the
///   number of given axes doesn't match the ranks, or when an axis is out of
///   range.
/// * Configuration error when an axis is listed twice.
///
/// # Example
/// ```
/// use npf_functional::{process_mask_axis, AxisSpec};
///
/// let axes = process_mask_axis(2, 1, &AxisSpec::mask_axis(1)).unwrap();
/// assert_eq!(axes.mask_axis(), &[1]);
/// assert_eq!(axes.non_mask_axis(), &[0]);
/// ```
pub fn process_mask_axis(array_rank: usize, mask_rank: usize, spec: &AxisSpec) -> Result<AxisSet> {
    let rank_context = || {
        ErrorContext::new()
            .with_metadata("array_rank", array_rank.to_string())
            .with_metadata("mask_rank", mask_rank.to_string())
    };

    let axis_set = match spec {
        AxisSpec::Unspecified => {
            if array_rank != mask_rank {
                return Err(TensorError::shape_mismatch(
                    "process_mask_axis",
                    &format!(
                        "array and mask must have equal rank when no axis is specified (array rank {array_rank})"
                    ),
                    &format!("mask rank {mask_rank}"),
                )
                .with_context(rank_context()));
            }
            AxisSet::from_mask_axis((0..array_rank).collect(), array_rank)
        }
        AxisSpec::MaskAxis(axes) => {
            if axes.len() != mask_rank {
                return Err(TensorError::shape_mismatch(
                    "process_mask_axis",
                    &format!("length of mask_axis to equal mask rank {mask_rank}"),
                    &format!("{} axes {:?}", axes.len(), axes.to_vec()),
                )
                .with_context(rank_context()));
            }
            let mask_axis = canonical_axes(axes, array_rank, "mask_axis")?;
            AxisSet::from_mask_axis(mask_axis, array_rank)
        }
        AxisSpec::NonMaskAxis(axes) => {
            let expected = array_rank.checked_sub(mask_rank).ok_or_else(|| {
                TensorError::shape_mismatch(
                    "process_mask_axis",
                    &format!("mask rank at most array rank {array_rank}"),
                    &format!("mask rank {mask_rank}"),
                )
                .with_context(rank_context())
            })?;
            if axes.len() != expected {
                return Err(TensorError::shape_mismatch(
                    "process_mask_axis",
                    &format!("length of non_mask_axis to equal array rank - mask rank = {expected}"),
                    &format!("{} axes {:?}", axes.len(), axes.to_vec()),
                )
                .with_context(rank_context()));
            }
            let non_mask_axis = canonical_axes(axes, array_rank, "non_mask_axis")?;
            AxisSet::from_non_mask_axis(non_mask_axis, array_rank)
        }
    };

    tracing::debug!(
        array_rank,
        mask_rank,
        mask_axis = ?axis_set.mask_axis,
        non_mask_axis = ?axis_set.non_mask_axis,
        "resolved mask axes"
    );
    Ok(axis_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_requires_equal_rank() {
        let axes = process_mask_axis(3, 3, &AxisSpec::Unspecified).unwrap();
        assert_eq!(axes.mask_axis(), &[0, 1, 2]);
        assert!(axes.non_mask_axis().is_empty());

        let err = process_mask_axis(3, 2, &AxisSpec::Unspecified).unwrap_err();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("equal rank"));
    }

    #[test]
    fn test_mask_axis_scalar_and_negative() {
        let axes = process_mask_axis(2, 1, &AxisSpec::mask_axis(-1)).unwrap();
        assert_eq!(axes.mask_axis(), &[1]);
        assert_eq!(axes.non_mask_axis(), &[0]);

        let axes = process_mask_axis(4, 2, &AxisSpec::mask_axis([3, 1])).unwrap();
        assert_eq!(axes.mask_axis(), &[1, 3]);
        assert_eq!(axes.non_mask_axis(), &[0, 2]);
    }

    #[test]
    fn test_non_mask_axis_complement() {
        let axes = process_mask_axis(4, 2, &AxisSpec::non_mask_axis(vec![0, -1])).unwrap();
        assert_eq!(axes.mask_axis(), &[1, 2]);
        assert_eq!(axes.non_mask_axis(), &[0, 3]);
        assert_eq!(axes.rank(), 4);
    }

    #[test]
    fn test_declared_length_mismatch() {
        let err = process_mask_axis(3, 2, &AxisSpec::mask_axis(0)).unwrap_err();
        assert!(err.is_shape_error());

        let err = process_mask_axis(3, 1, &AxisSpec::non_mask_axis(0)).unwrap_err();
        assert!(err.is_shape_error());

        let err = process_mask_axis(1, 2, &AxisSpec::non_mask_axis(Vec::new())).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_out_of_range_and_duplicate_axes() {
        let err = process_mask_axis(2, 1, &AxisSpec::mask_axis(2)).unwrap_err();
        assert!(err.is_shape_error());

        let err = process_mask_axis(3, 2, &AxisSpec::mask_axis([1, -2])).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_from_options() {
        assert_eq!(
            AxisSpec::from_options(None, None).unwrap(),
            AxisSpec::Unspecified
        );
        assert_eq!(
            AxisSpec::from_options(Some(1.into()), None).unwrap(),
            AxisSpec::MaskAxis(Axes::One(1))
        );
        assert_eq!(
            AxisSpec::from_options(None, Some(vec![0, 2].into())).unwrap(),
            AxisSpec::NonMaskAxis(Axes::Many(vec![0, 2]))
        );

        let err = AxisSpec::from_options(Some(0.into()), Some(1.into())).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("only one of mask_axis/non_mask_axis"));
    }

    #[test]
    fn test_scalar_or_sequence() {
        assert_eq!(Axes::from(3).to_vec(), vec![3]);
        assert_eq!(Axes::from(&[1, 2][..]).len(), 2);
        assert!(Axes::from(Vec::new()).is_empty());
        assert_eq!(Repeats::from([2usize, 3]).to_vec(), vec![2, 3]);
    }
}
