use anyhow::Result;
use vue_routes::{MemoryWriter, RouteAttributes, RouteTree};

/// Two plain routes and an admin section whose children carry explicit orders
pub fn build() -> Result<RouteTree<MemoryWriter>> {
    let mut tree = RouteTree::with_writer("router.js", MemoryWriter::new());
    tree.add("/home", "Home")?;
    tree.add("/products/list", "ProductList")?;

    let admin = tree.add("/admin", "Admin")?;
    admin.add_with("crud", "CrudView", RouteAttributes::new(), 5)?;
    admin.add_with("crud2", "Crud2View", RouteAttributes::new(), 2)?;

    Ok(tree)
}

pub fn execute() -> Result<()> {
    print!("{}", build()?);
    Ok(())
}
