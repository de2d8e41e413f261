use crate::records::{Order, OrderCategory, Role};
use crate::{Result, StoreError};

/// Orders of one category, plus how many orders each category holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersView {
    pub category: OrderCategory,
    pub orders: Vec<Order>,
    pub counts: Vec<(OrderCategory, usize)>,
}

impl OrdersView {
    pub fn compute(orders: &[Order], category: OrderCategory) -> Self {
        let counts = OrderCategory::ALL
            .into_iter()
            .map(|c| (c, orders.iter().filter(|o| o.category == c).count()))
            .collect();
        Self {
            category,
            orders: orders
                .iter()
                .filter(|o| o.category == category)
                .cloned()
                .collect(),
            counts,
        }
    }

    /// Orders are a seller-only page.
    pub fn for_role(
        role: Option<Role>,
        orders: &[Order],
        category: OrderCategory,
    ) -> Result<Self> {
        match role {
            Some(Role::Seller) => Ok(Self::compute(orders, category)),
            _ => Err(StoreError::SellerOnly),
        }
    }

    pub fn count(&self, category: OrderCategory) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }
}
