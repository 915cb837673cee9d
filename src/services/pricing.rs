//! Order pricing and presentation
//!
//! The final price derives from the cake's total price, adjusted by the
//! promo discount and the urgency surcharge:
//!
//! ```text
//! final = round(base * (1 - discount) * urgency_multiplier, 2)
//! ```
//!
//! No promo code means a discount of 0; an order without a delivery time is
//! priced as non-urgent.

use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::errors::Result;
use crate::repository::Order;
use crate::utils::format_price;

pub struct PricingService {
    config: PricingConfig,
}

impl PricingService {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Final order price, rounded to 2 fraction digits.
    pub fn order_price(&self, order: &Order) -> Result<Decimal> {
        let base = order.cake.base_price();

        let discount = order
            .promo_code
            .as_ref()
            .map(|promo| promo.discount)
            .unwrap_or(Decimal::ZERO);

        let urgent = match order.delivery_dt {
            Some(_) => order.is_urgent()?,
            None => false,
        };
        let multiplier = if urgent {
            Decimal::ONE + self.config.urgent_order_allowance
        } else {
            Decimal::ONE
        };

        Ok((base * (Decimal::ONE - discount) * multiplier).round_dp(2))
    }

    /// Human-readable order summary: the order and cake headers, the cake
    /// composition, delivery details and the final price.
    pub fn order_description(&self, order: &Order) -> Result<String> {
        let mut lines = vec![
            order.to_string(),
            format!("{} для клиента {}", order.cake, order.client),
            order.cake.composition(),
        ];

        let address = order
            .address
            .as_deref()
            .or(order.client.address.as_deref())
            .unwrap_or("не указан");

        match order.delivery_dt {
            Some(delivery_dt) => lines.push(format!(
                "Доставка {} по адресу: {}",
                delivery_dt.format("%d.%m.%Y %H:%M"),
                address
            )),
            None => lines.push(format!(
                "Адрес доставки: {} (время доставки уточняется)",
                address
            )),
        }

        if let Some(promo) = &order.promo_code {
            lines.push(promo.to_string());
        }
        if let Some(comment) = &order.comment {
            lines.push(format!("Комментарий: {}", comment));
        }

        lines.push(format!("Итого: {}", format_price(self.order_price(order)?)));
        Ok(lines.join("\n"))
    }
}
