use bakecake::config::PricingConfig;
use bakecake::errors::BakeCakeError;
use bakecake::repository::models::{Cake, CakeParam, Client, Order, PromoCode};
use bakecake::services::PricingService;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn param(title: &str, price: Decimal) -> CakeParam {
    CakeParam {
        id: 1,
        title: title.to_string(),
        price,
        is_available: true,
    }
}

/// Base price 1000
fn cake() -> Cake {
    Cake {
        id: 7,
        is_original: false,
        title: None,
        image: None,
        description: None,
        text: None,
        level: param("2", dec!(600)),
        shape: param("Квадрат", dec!(300)),
        topping: param("Белый соус", dec!(100)),
        berries: None,
        decor: None,
    }
}

fn client() -> Client {
    Client {
        id: 3,
        id_telegram: "42".to_string(),
        name: "Анна".to_string(),
        address: Some("ул. Пекарская, 1".to_string()),
        consent_to_pd_proc: true,
    }
}

fn order() -> Order {
    Order {
        id: 5,
        cake: cake(),
        client: client(),
        order_dt: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        delivery_dt: None,
        address: None,
        promo_code: None,
        comment: None,
        complaint: None,
    }
}

fn service() -> PricingService {
    PricingService::new(PricingConfig {
        urgent_order_allowance: dec!(0.2),
    })
}

#[cfg(test)]
mod urgency_tests {
    use super::*;

    #[test]
    fn test_urgent_below_24_hours() {
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::hours(23) + Duration::minutes(59));

        assert!(order.is_urgent().unwrap());
    }

    #[test]
    fn test_not_urgent_at_exactly_24_hours() {
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::hours(24));

        assert!(!order.is_urgent().unwrap());
    }

    #[test]
    fn test_not_urgent_above_24_hours() {
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::days(3));

        assert!(!order.is_urgent().unwrap());
    }

    #[test]
    fn test_urgency_requires_delivery_time() {
        let result = order().is_urgent();

        assert!(matches!(result, Err(BakeCakeError::MissingOrderData(_))));
    }
}

#[cfg(test)]
mod pricing_tests {
    use super::*;

    #[test]
    fn test_urgent_order_with_promo() {
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::hours(12));
        order.promo_code = Some(PromoCode {
            id: 1,
            code: "SWEET10".to_string(),
            discount: dec!(0.10),
        });

        // 1000 * 0.9 * 1.2 = 1080.00
        assert_eq!(service().order_price(&order).unwrap(), dec!(1080.00));
    }

    #[test]
    fn test_no_promo_means_zero_discount() {
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::days(2));

        assert_eq!(service().order_price(&order).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_no_delivery_time_priced_as_non_urgent() {
        assert_eq!(service().order_price(&order()).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_full_discount_prices_to_zero() {
        let mut order = order();
        order.promo_code = Some(PromoCode {
            id: 2,
            code: "FREECAKE".to_string(),
            discount: dec!(1),
        });

        assert_eq!(service().order_price(&order).unwrap(), dec!(0.00));
    }

    #[test]
    fn test_price_rounded_to_two_digits() {
        let mut order = order();
        order.cake.topping.price = dec!(100.99); // base 1000.99
        order.promo_code = Some(PromoCode {
            id: 3,
            code: "THIRD".to_string(),
            discount: dec!(0.33),
        });

        // 1000.99 * 0.67 = 670.6633
        assert_eq!(service().order_price(&order).unwrap(), dec!(670.66));
    }

    #[test]
    fn test_urgency_surcharge_uses_configured_allowance() {
        let service = PricingService::new(PricingConfig {
            urgent_order_allowance: dec!(0.5),
        });
        let mut order = order();
        order.delivery_dt = Some(order.order_dt + Duration::hours(1));

        assert_eq!(service.order_price(&order).unwrap(), dec!(1500.00));
    }
}

#[cfg(test)]
mod description_tests {
    use super::*;

    #[test]
    fn test_description_with_delivery_time() {
        let mut order = order();
        order.delivery_dt = Some(Utc.with_ymd_and_hms(2026, 3, 2, 15, 30, 0).unwrap());

        let description = service().order_description(&order).unwrap();

        assert!(description.contains("Заказ #5"));
        assert!(description.contains("Торт #7"));
        assert!(description.contains("Доставка 02.03.2026 15:30 по адресу: ул. Пекарская, 1"));
        assert!(description.contains("Итого: 1000.00 руб."));
    }

    #[test]
    fn test_description_without_delivery_time() {
        let description = service().order_description(&order()).unwrap();

        assert!(!description.contains("Доставка "));
        assert!(description.contains("Адрес доставки: ул. Пекарская, 1"));
    }

    #[test]
    fn test_description_prefers_order_address() {
        let mut order = order();
        order.address = Some("пр. Кондитеров, 9".to_string());

        let description = service().order_description(&order).unwrap();

        assert!(description.contains("пр. Кондитеров, 9"));
        assert!(!description.contains("ул. Пекарская, 1"));
    }

    #[test]
    fn test_description_mentions_promo_and_comment() {
        let mut order = order();
        order.promo_code = Some(PromoCode {
            id: 1,
            code: "SWEET10".to_string(),
            discount: dec!(0.10),
        });
        order.comment = Some("Позвонить за час".to_string());

        let description = service().order_description(&order).unwrap();

        assert!(description.contains("Код \"SWEET10\" на скидку 10%"));
        assert!(description.contains("Комментарий: Позвонить за час"));
        assert!(description.contains("Итого: 900.00 руб."));
    }
}
