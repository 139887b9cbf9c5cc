pub mod fake_payment_provider;
