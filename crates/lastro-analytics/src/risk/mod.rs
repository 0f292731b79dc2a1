//! Duration measures.

/// Macaulay duration in years over the strictly positive cashflows.
///
/// Takes `(amount, pv, t_years)` triples. Returns `None` when no positive
/// cashflow remains or their present value is not positive.
pub fn macaulay_duration<I>(rows: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64, f64)>,
{
    let (pv_total, weighted) = rows
        .into_iter()
        .filter(|&(amount, _, _)| amount > 0.0)
        .fold((0.0, 0.0), |(pv_sum, weighted), (_, pv, t)| {
            (pv_sum + pv, weighted + pv * t)
        });

    (pv_total > 0.0).then(|| weighted / pv_total)
}
