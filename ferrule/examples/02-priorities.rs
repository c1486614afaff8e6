// note: this example assumes you've analyzed the previous one

use ferrule::application;
use ferrule::runner::{ApplicationRunner, ErrorPtr};
use ferrule_di::{provides, provisions, Service};

#[derive(Service)]
struct PrintHelloRunner;

#[provides]
impl ApplicationRunner for PrintHelloRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        print!("Hello ");
        Ok(())
    }

    // for ordered execution of application runners, priorities can be used
    fn priority(&self) -> i8 {
        3
    }
}

#[derive(Service)]
struct PrintWorldRunner;

#[provides]
impl ApplicationRunner for PrintWorldRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        print!("world");
        Ok(())
    }

    fn priority(&self) -> i8 {
        2
    }
}

#[derive(Service)]
struct PrintExclamationRunner;

#[provides]
impl ApplicationRunner for PrintExclamationRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        println!("!");
        Ok(())
    }

    fn priority(&self) -> i8 {
        1
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let application =
        application::create_default().expect("unable to create default application");

    // registration order doesn't matter, since runners are sorted by priority
    application
        .injector()
        .provide_all(provisions![
            PrintWorldRunner,
            PrintExclamationRunner,
            PrintHelloRunner
        ])
        .expect("unable to register runners");

    // prints "Hello world!"
    application.run().expect("error running application");
}
