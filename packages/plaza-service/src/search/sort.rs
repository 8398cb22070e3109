use std::cmp::Ordering;

use plaza_domain::goods::Goods;

/// Captures retrieval order before any re-ranking: every candidate gets a
/// 1-based `similarity_rank` by list position, and the retriever's score is
/// attached when it surfaced one. The rank is positional either way.
pub fn attach_ranks(rows: Vec<(Goods, Option<f32>)>) -> Vec<Goods> {
	rows.into_iter()
		.enumerate()
		.map(|(idx, (mut goods, score))| {
			goods.similarity_score = score.unwrap_or(0.0);
			goods.similarity_rank = idx as u32 + 1;

			goods
		})
		.collect()
}

/// Orders candidates by the composite sale-status / weight / sales-volume
/// key. The sort is stable and the trailing identifier level makes the
/// order total, so re-sorting sorted output is a no-op.
pub fn sort_goods(mut goods: Vec<Goods>) -> Vec<Goods> {
	goods.sort_by(compare_goods);

	goods
}

fn compare_goods(left: &Goods, right: &Goods) -> Ordering {
	left.sale_status_code
		.cmp(&right.sale_status_code)
		.then_with(|| bool_desc(!left.is_display_only(), !right.is_display_only()))
		.then_with(|| bool_desc(left.is_appliance, right.is_appliance))
		.then_with(|| cmp_f32_desc(left.weight, right.weight))
		.then_with(|| right.sales_unit.cmp(&left.sales_unit))
		.then_with(|| right.sale_qty.cmp(&left.sale_qty))
		.then_with(|| bool_desc(left.is_rental_or_consult(), right.is_rental_or_consult()))
		.then_with(|| left.sale_status_code.cmp(&right.sale_status_code))
		.then_with(|| cmp_goods_no_desc(&left.goods_no, &right.goods_no))
}

fn bool_desc(left: bool, right: bool) -> Ordering {
	right.cmp(&left)
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

fn cmp_goods_no_desc(left: &str, right: &str) -> Ordering {
	match (left.parse::<u64>(), right.parse::<u64>()) {
		(Ok(left), Ok(right)) => right.cmp(&left),
		_ => right.cmp(left),
	}
}

#[cfg(test)]
mod tests {
	use super::{attach_ranks, sort_goods};
	use plaza_domain::goods::Goods;

	fn goods(goods_no: &str, weight: f32) -> Goods {
		Goods {
			goods_no: goods_no.to_string(),
			sale_status_code: "01".to_string(),
			weight,
			..Default::default()
		}
	}

	#[test]
	fn ranks_follow_received_order_with_or_without_scores() {
		let rows = vec![
			(goods("001", 0.0), Some(0.91)),
			(goods("002", 0.0), None),
			(goods("003", 0.0), Some(0.42)),
		];
		let ranked = attach_ranks(rows);

		assert_eq!(ranked[0].similarity_rank, 1);
		assert_eq!(ranked[0].similarity_score, 0.91);
		assert_eq!(ranked[1].similarity_rank, 2);
		assert_eq!(ranked[1].similarity_score, 0.0);
		assert_eq!(ranked[2].similarity_rank, 3);
	}

	#[test]
	fn weight_ties_break_on_identifier_descending() {
		let sorted = sort_goods(vec![goods("003", 3.0), goods("001", 5.0), goods("002", 5.0)]);
		let order: Vec<&str> = sorted.iter().map(|goods| goods.goods_no.as_str()).collect();

		assert_eq!(order, vec!["002", "001", "003"]);
	}

	#[test]
	fn on_sale_status_wins_over_weight() {
		let mut out_of_stock = goods("100", 9.0);

		out_of_stock.sale_status_code = "02".to_string();

		let sorted = sort_goods(vec![out_of_stock, goods("200", 1.0)]);

		assert_eq!(sorted[0].goods_no, "200");
	}

	#[test]
	fn rental_listings_break_full_ties_within_a_status_band() {
		let mut display_only = goods("300", 2.0);

		display_only.sale_status_code = "03".to_string();

		let mut rental = goods("400", 2.0);

		rental.sale_status_code = "03".to_string();
		rental.goods_type_code = "05".to_string();

		// Equal status, flags, weight and volumes; the rental type decides.
		let sorted = sort_goods(vec![display_only.clone(), rental]);

		assert_eq!(sorted[0].goods_no, "400");

		// A lower status code beats 03 regardless of weight.
		let sorted = sort_goods(vec![display_only, goods("500", 0.0)]);

		assert_eq!(sorted[0].goods_no, "500");
	}

	#[test]
	fn appliances_rank_before_non_appliances() {
		let mut appliance = goods("010", 1.0);

		appliance.is_appliance = true;

		let sorted = sort_goods(vec![goods("020", 9.0), appliance]);

		assert_eq!(sorted[0].goods_no, "010");
	}

	#[test]
	fn sales_volumes_break_weight_ties() {
		let mut high_unit = goods("111", 2.0);

		high_unit.sales_unit = 40;

		let mut high_qty = goods("222", 2.0);

		high_qty.sales_unit = 40;
		high_qty.sale_qty = 7;

		let sorted = sort_goods(vec![goods("333", 2.0), high_unit, high_qty]);
		let order: Vec<&str> = sorted.iter().map(|goods| goods.goods_no.as_str()).collect();

		assert_eq!(order, vec!["222", "111", "333"]);
	}

	#[test]
	fn non_numeric_identifiers_fall_back_to_lexicographic_descending() {
		let sorted = sort_goods(vec![goods("A100", 1.0), goods("B100", 1.0)]);

		assert_eq!(sorted[0].goods_no, "B100");
	}

	#[test]
	fn sorting_sorted_output_is_a_no_op() {
		let mut items = vec![goods("003", 3.0), goods("001", 5.0), goods("002", 5.0)];

		items[0].sales_unit = 12;
		items[2].is_appliance = true;

		let once = sort_goods(items);
		let twice = sort_goods(once.clone());
		let once_ids: Vec<&str> = once.iter().map(|goods| goods.goods_no.as_str()).collect();
		let twice_ids: Vec<&str> = twice.iter().map(|goods| goods.goods_no.as_str()).collect();

		assert_eq!(once_ids, twice_ids);
	}

	#[test]
	fn nan_weights_sort_after_real_weights() {
		let sorted = sort_goods(vec![goods("900", f32::NAN), goods("901", 0.1)]);

		assert_eq!(sorted[0].goods_no, "901");
	}
}
