use ferrule_di::error::ErrorPtr;
use ferrule_di::injector::Injector;
use ferrule_di::resolver::ServicePtr;
use ferrule_di::{capability, provides, Service};

#[capability]
trait Clock {
    fn now(&self) -> u64;
}

#[derive(Service)]
struct FixedClock;

#[provides]
impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[derive(Service)]
struct Config {
    name: &'static str,
}

fn print_time(clock: ServicePtr<dyn Clock + Send + Sync>, config: ServicePtr<Config>) -> Result<(), ErrorPtr> {
    println!("{}: {}", config.name, clock.now());
    Ok(())
}

fn main() {
    let injector = Injector::new();
    injector.provide(FixedClock).expect("error registering FixedClock");
    injector
        .provide(Config { name: "clock" })
        .expect("error registering Config");

    // any function taking injectable parameters can be called by the container
    injector
        .prepare_func(print_time)
        .expect("error calling print_time");

    // closures work too, including optional parameters and the container itself
    injector
        .prepare_func(
            |clock: Option<ServicePtr<dyn Clock + Send + Sync>>,
             injector: Injector|
             -> Result<(), ErrorPtr> {
                println!("Clock present: {}, services: {}", clock.is_some(), injector.len());
                Ok(())
            },
        )
        .expect("error calling closure");

    // errors returned from injected functions are surfaced to the caller
    let error = injector
        .prepare_func(|_: ServicePtr<dyn Clock + Send + Sync>| -> Result<(), String> {
            Err("clock is broken".to_string())
        })
        .unwrap_err();
    println!("{error}");
}
