/// 均值，空序列返回 None
pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

/// 样本标准差（除以 n-1）
///
/// 空序列返回 None，单个样本返回 0。
pub fn sample_stdev(values: &[i64]) -> Option<f64> {
    let avg = mean(values)?;
    if values.len() == 1 {
        return Some(0.0);
    }
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - avg;
            d * d
        })
        .sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// 忽略 None 的浮点均值，全部为 None 时返回 None
pub fn mean_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
