use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub total_count: usize,
	pub total_pages: u32,
	pub current_page: u32,
	pub page_size: u32,
}

/// Slices an already-ordered result list into one page. Pages are 1-based;
/// a page past the end yields an empty item list with the totals intact.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Page<T> {
	let page = page.max(1);
	let page_size = page_size.max(1);
	let total_count = items.len();
	let total_pages = total_count.div_ceil(page_size as usize) as u32;
	let start = (page as usize - 1).saturating_mul(page_size as usize);
	let items = items.into_iter().skip(start).take(page_size as usize).collect();

	Page { items, total_count, total_pages, current_page: page, page_size }
}

#[cfg(test)]
mod tests {
	use super::paginate;

	#[test]
	fn pages_slice_in_order() {
		let page = paginate((1..=7).collect::<Vec<_>>(), 2, 3);

		assert_eq!(page.items, vec![4, 5, 6]);
		assert_eq!(page.total_count, 7);
		assert_eq!(page.total_pages, 3);
		assert_eq!(page.current_page, 2);
		assert_eq!(page.page_size, 3);
	}

	#[test]
	fn page_past_the_end_is_empty_with_totals_intact() {
		let page = paginate(vec![1, 2, 3], 9, 2);

		assert!(page.items.is_empty());
		assert_eq!(page.total_count, 3);
		assert_eq!(page.total_pages, 2);
	}

	#[test]
	fn exact_multiple_has_no_partial_page() {
		let page = paginate((1..=6).collect::<Vec<_>>(), 3, 2);

		assert_eq!(page.items, vec![5, 6]);
		assert_eq!(page.total_pages, 3);
	}

	#[test]
	fn empty_input_yields_zero_pages() {
		let page = paginate(Vec::<i32>::new(), 1, 30);

		assert!(page.items.is_empty());
		assert_eq!(page.total_count, 0);
		assert_eq!(page.total_pages, 0);
	}
}
