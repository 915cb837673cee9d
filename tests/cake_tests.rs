use bakecake::repository::models::{
    Cake, CakeParam, Client, NewParam, NewPromoCode, ParamKind, PromoCode,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn param(id: i64, title: &str, price: Decimal) -> CakeParam {
    CakeParam {
        id,
        title: title.to_string(),
        price,
        is_available: true,
    }
}

/// Level 600 + shape 300 + topping 100, no optionals: base 1000
fn plain_cake() -> Cake {
    Cake {
        id: 1,
        is_original: false,
        title: None,
        image: None,
        description: None,
        text: None,
        level: param(1, "2", dec!(600)),
        shape: param(1, "Квадрат", dec!(300)),
        topping: param(1, "Белый соус", dec!(100)),
        berries: None,
        decor: None,
    }
}

fn full_cake() -> Cake {
    let mut cake = plain_cake();
    cake.berries = Some(param(2, "Голубика", dec!(150)));
    cake.decor = Some(param(3, "Фисташки", dec!(70)));
    cake
}

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn test_params_mandatory_only() {
        let cake = plain_cake();
        let params = cake.params();

        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_params_with_optionals_each_once() {
        let cake = full_cake();
        let params = cake.params();

        assert_eq!(params.len(), 5);
        // no component is listed twice
        let titles: Vec<&str> = params.iter().map(|p| p.title.as_str()).collect();
        let mut deduped = titles.clone();
        deduped.dedup();
        assert_eq!(titles, deduped);
    }
}

#[cfg(test)]
mod price_tests {
    use super::*;

    #[test]
    fn test_base_price_sums_mandatory() {
        assert_eq!(plain_cake().base_price(), dec!(1000));
    }

    #[test]
    fn test_base_price_includes_optionals() {
        assert_eq!(full_cake().base_price(), dec!(1220));
    }

    #[test]
    fn test_absent_optionals_contribute_zero() {
        let with = full_cake().base_price();
        let without = plain_cake().base_price();

        assert_eq!(with - without, dec!(220));
    }
}

#[cfg(test)]
mod verify_tests {
    use super::*;

    #[test]
    fn test_verify_all_available() {
        assert!(full_cake().verify());
    }

    #[test]
    fn test_verify_fails_on_unavailable_mandatory() {
        let mut cake = plain_cake();
        cake.topping.is_available = false;

        assert!(!cake.verify());
    }

    #[test]
    fn test_verify_fails_on_unavailable_optional() {
        let mut cake = full_cake();
        cake.decor.as_mut().unwrap().is_available = false;

        assert!(!cake.verify());
    }

    #[test]
    fn test_verify_skips_absent_optionals() {
        // no berries/decor at all must not fail the check
        assert!(plain_cake().verify());
    }
}

#[cfg(test)]
mod composition_tests {
    use super::*;

    #[test]
    fn test_composition_lists_present_attributes() {
        let composition = full_cake().composition();

        assert!(composition.contains("Уровни: 2"));
        assert!(composition.contains("Форма: Квадрат"));
        assert!(composition.contains("Топпинг: Белый соус"));
        assert!(composition.contains("Ягоды: Голубика"));
        assert!(composition.contains("Декор: Фисташки"));
        assert!(composition.contains("Цена: 1220.00 руб."));
    }

    #[test]
    fn test_composition_omits_absent_lines() {
        let composition = plain_cake().composition();

        assert!(!composition.contains("Ягоды"));
        assert!(!composition.contains("Декор"));
        assert!(!composition.contains("Надпись"));
        assert!(composition.contains("Цена: 1000.00 руб."));
    }

    #[test]
    fn test_composition_includes_inscription() {
        let mut cake = plain_cake();
        cake.text = Some("С днём рождения!".to_string());

        assert!(cake.composition().contains("Надпись: С днём рождения!"));
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_cake_display_with_title() {
        let mut cake = plain_cake();
        cake.title = Some("Праздничный".to_string());

        assert_eq!(cake.to_string(), "Торт Праздничный");
    }

    #[test]
    fn test_cake_display_without_title() {
        assert_eq!(plain_cake().to_string(), "Торт #1");
    }

    #[test]
    fn test_client_display() {
        let client = Client {
            id: 1,
            id_telegram: "123456".to_string(),
            name: "Дорогой Гость".to_string(),
            address: None,
            consent_to_pd_proc: false,
        };

        assert_eq!(client.to_string(), "Дорогой Гость, 123456");
    }

    #[test]
    fn test_promo_code_display() {
        let promo = PromoCode {
            id: 1,
            code: "SWEET10".to_string(),
            discount: dec!(0.10),
        };

        assert_eq!(promo.to_string(), "Код \"SWEET10\" на скидку 10%");
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let param = NewParam {
            title: "Круг".to_string(),
            price: dec!(-1),
            is_available: true,
        };

        assert!(param.validate(ParamKind::Shape).is_err());
    }

    #[test]
    fn test_level_count_out_of_range_rejected() {
        for title in ["0", "4", "abc", ""] {
            let param = NewParam {
                title: title.to_string(),
                price: dec!(100),
                is_available: true,
            };
            assert!(param.validate(ParamKind::Level).is_err(), "accepted {:?}", title);
        }
    }

    #[test]
    fn test_valid_level_accepted() {
        for title in ["1", "2", "3"] {
            let param = NewParam {
                title: title.to_string(),
                price: dec!(100),
                is_available: true,
            };
            assert!(param.validate(ParamKind::Level).is_ok());
        }
    }

    #[test]
    fn test_promo_discount_bounds() {
        let make = |discount| NewPromoCode {
            code: "CAKE".to_string(),
            discount,
        };

        assert!(make(dec!(-0.01)).validate().is_err());
        assert!(make(dec!(1.01)).validate().is_err());
        assert!(make(dec!(0)).validate().is_ok());
        assert!(make(dec!(1)).validate().is_ok());
        assert!(make(dec!(0.25)).validate().is_ok());
    }

    #[test]
    fn test_empty_promo_code_rejected() {
        let promo = NewPromoCode {
            code: "  ".to_string(),
            discount: dec!(0.1),
        };

        assert!(promo.validate().is_err());
    }
}
