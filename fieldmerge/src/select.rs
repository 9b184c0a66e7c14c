//! Precedence and zero-value filtering across path alternatives.

use tracing::trace;

use crate::resolve::{Resolution, Resolved};
use crate::tag::TagOptions;

/// Picks the value to assign from the per-alternative outcomes.
///
/// Outcomes are given in tag order. The last found value wins; with
/// `skipzero`, zero values are discarded before precedence applies.
/// Returns `None` when nothing qualifies.
///
/// # Examples
///
/// ```
/// use fieldmerge::{Resolution, Resolved, TagExpression, select::select};
///
/// let tag = TagExpression::parse("A|B,skipzero")?;
/// let (first, second) = (7_u32, 0_u32);
/// let chosen = select(
///     tag.options(),
///     [
///         Resolution::Found(Resolved::Borrowed(&first)),
///         Resolution::Found(Resolved::Borrowed(&second)),
///     ],
/// );
/// assert_eq!(chosen.and_then(|value| value.downcast::<u32>()), Some(7));
/// # Ok::<(), fieldmerge::TagError>(())
/// ```
pub fn select<'a, I>(options: &TagOptions, outcomes: I) -> Option<Resolved<'a>>
where
    I: IntoIterator<Item = Resolution<'a>>,
{
    let mut chosen = None;
    for outcome in outcomes {
        let Resolution::Found(value) = outcome else {
            continue;
        };
        if options.skip_zero() && value.value().is_zero() {
            trace!(value_type = value.value().type_name(), "skipping zero value");
            continue;
        }
        chosen = Some(value);
    }
    chosen
}
