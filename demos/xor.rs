use glyphnet::{train_instance, Instance, Network};

fn main() {
    let instances = [
        (Instance::new(0, vec![-1.0, -1.0]), 0.1),
        (Instance::new(1, vec![-1.0, 1.0]), 0.9),
        (Instance::new(1, vec![1.0, -1.0]), 0.9),
        (Instance::new(0, vec![1.0, 1.0]), 0.1),
    ];

    let mut network = Network::build(&[2, 2, 1], 0.5).expect("2-2-1 network");

    for pass in 0..5000 {
        let mut total_error = 0.0;
        for (instance, target) in &instances {
            let output =
                train_instance(&mut network, instance, 0.5, &[*target]).expect("training step");
            total_error += (target - output[0]).abs();
        }
        if pass % 1000 == 0 {
            println!(
                "Pass {pass}: mean error = {:.6}",
                total_error / instances.len() as f64
            );
        }
    }

    for (instance, target) in &instances {
        let output = network.feed_forward(&instance.features).expect("forward pass");
        println!(
            "Input: {:?} -> target {target}, output {:.4}",
            instance.features, output[0]
        );
    }
}
