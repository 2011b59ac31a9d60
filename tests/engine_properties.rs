use debtpayoff::application::engine::PayoffEngine;
use debtpayoff::application::report::{Verdict, compare};
use debtpayoff::domain::debt::{Debt, Money};
use debtpayoff::domain::strategy::Strategy;
use debtpayoff::simulate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

const EPSILON: Decimal = dec!(0.01);

/// Debts whose minimum always beats their own interest, so every balance
/// shrinks each month.
fn amortizing_debts(rng: &mut StdRng) -> Vec<Debt> {
    let count = rng.gen_range(1..=6);
    (1..=count)
        .map(|id| {
            let balance = Decimal::new(rng.gen_range(100_000..20_000_000), 2);
            let rate = Decimal::new(rng.gen_range(0..4800), 2);
            let interest = (balance * rate / dec!(1200)).ceil();
            let minimum = interest + (balance / dec!(100)).ceil() + Decimal::ONE;
            Debt::new(id, format!("D{id}"), balance, rate, minimum)
        })
        .collect()
}

#[test]
fn test_balances_never_increase_across_cycles() {
    let mut rng = StdRng::seed_from_u64(7);
    let engine = PayoffEngine::default();

    for _ in 0..50 {
        let debts = amortizing_debts(&mut rng);
        let extra = Money::new(Decimal::from(rng.gen_range(0..5000i64)));

        for strategy in Strategy::ALL {
            let (result, schedule) = engine.simulate_with_schedule(&debts, extra, strategy);
            assert!(result.converged);
            assert_eq!(schedule.len() as u32, result.months_to_payoff);

            let mut previous: Vec<Money> = debts.iter().map(|debt| debt.balance).collect();
            for snapshot in &schedule {
                for (now, before) in snapshot.balances.iter().zip(&previous) {
                    assert!(now <= before, "balance grew in month {}", snapshot.month);
                }
                previous = snapshot.balances.clone();
            }
        }
    }
}

#[test]
fn test_every_debt_enters_payoff_order_once() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let debts = amortizing_debts(&mut rng);
        let extra = Money::new(Decimal::from(rng.gen_range(0..5000i64)));

        for strategy in Strategy::ALL {
            let result = simulate(&debts, extra, strategy);
            let mut order = result.payoff_order.clone();
            order.sort();
            let mut labels: Vec<String> = debts.iter().map(|debt| debt.label.clone()).collect();
            labels.sort();
            assert_eq!(order, labels);
        }
    }
}

#[test]
fn test_zero_debts_identity() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let extra = Money::new(Decimal::new(rng.gen_range(0..10_000_000), 2));
        for strategy in Strategy::ALL {
            let result = simulate(&[], extra, strategy);
            assert_eq!(result.months_to_payoff, 0);
            assert_eq!(result.total_interest_paid, Money::ZERO);
            assert!(result.payoff_order.is_empty());
            assert!(result.converged);
        }
    }
}

#[test]
fn test_equal_rates_make_strategies_agree() {
    let mut rng = StdRng::seed_from_u64(19);

    for _ in 0..30 {
        let rate = Decimal::new(rng.gen_range(0..3600), 2);
        let minimum = Decimal::from(rng.gen_range(2_000..5_000i64));
        let mut balances: Vec<Decimal> = (0..rng.gen_range(2..=5))
            .map(|_| Decimal::from(rng.gen_range(1_000..100_000i64)))
            .collect();
        balances.sort();
        let debts: Vec<Debt> = balances
            .into_iter()
            .enumerate()
            .map(|(i, balance)| Debt::new(i as u32 + 1, format!("D{i}"), balance, rate, minimum))
            .collect();
        let extra = Money::new(Decimal::from(rng.gen_range(0..3000i64)));

        let snowball = simulate(&debts, extra, Strategy::SmallestBalanceFirst);
        let avalanche = simulate(&debts, extra, Strategy::HighestRateFirst);

        assert_eq!(snowball.months_to_payoff, avalanche.months_to_payoff);
        assert_eq!(snowball.total_interest_paid, avalanche.total_interest_paid);
        assert_eq!(
            compare(&snowball, &avalanche, EPSILON).verdict,
            Verdict::Equivalent
        );
    }
}

#[test]
fn test_large_budget_clears_everything_in_one_month() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..30 {
        let debts = amortizing_debts(&mut rng);
        let total: Decimal = debts.iter().map(|debt| debt.balance.value()).sum();
        let extra = Money::new(total * dec!(2));

        for strategy in Strategy::ALL {
            let result = simulate(&debts, extra, strategy);
            assert_eq!(result.months_to_payoff, 1);
            assert_eq!(result.payoff_order.len(), debts.len());
            assert!(result.converged);
        }
    }
}

#[test]
fn test_large_budget_order_follows_targeting() {
    let debts = vec![
        Debt::new(1, "Card", dec!(5000), dec!(10), dec!(100)),
        Debt::new(2, "Phone", dec!(1000), dec!(20), dec!(100)),
        Debt::new(3, "Gold", dec!(3000), dec!(30), dec!(100)),
    ];
    let extra = Money::new(dec!(100000));

    let snowball = simulate(&debts, extra, Strategy::SmallestBalanceFirst);
    let avalanche = simulate(&debts, extra, Strategy::HighestRateFirst);

    assert_eq!(snowball.payoff_order, vec!["Phone", "Gold", "Card"]);
    assert_eq!(avalanche.payoff_order, vec!["Gold", "Phone", "Card"]);
    assert_eq!(snowball.total_interest_paid, avalanche.total_interest_paid);
}

#[test]
fn test_simulation_is_deterministic() {
    let debts = common::reference_debts();
    let extra = Money::new(dec!(4000));
    let engine = PayoffEngine::default();

    for strategy in Strategy::ALL {
        let first = engine.simulate_with_schedule(&debts, extra, strategy);
        let second = engine.simulate_with_schedule(&debts, extra, strategy);
        assert_eq!(first, second);
    }
}
