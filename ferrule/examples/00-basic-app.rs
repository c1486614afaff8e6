use ferrule::application;
use ferrule::runner::{ApplicationRunner, ErrorPtr};
use ferrule_di::{provides, Service};

// this is an application runner, which will run when the application starts; the application
// finds it among services provided to its container
#[derive(Service)]
struct HelloWorldRunner;

#[provides]
impl ApplicationRunner for HelloWorldRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        println!("Hello world!");
        Ok(())
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // create our application with config taken from the environment
    let application =
        application::create_default().expect("unable to create default application");

    application
        .injector()
        .provide(HelloWorldRunner)
        .expect("unable to register runner");

    // prints "Hello world!"
    application.run().expect("error running application");
}
