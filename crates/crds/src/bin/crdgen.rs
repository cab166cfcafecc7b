//! Prints the IPPool CustomResourceDefinition as YAML.

use crds::IPPool;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&IPPool::crd())?);
    Ok(())
}
