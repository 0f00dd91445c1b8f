/// Builds an [`Element`](crate::stmt::Element) list from `name => value`
/// pairs.
#[macro_export]
macro_rules! elements {
    ( $( $name:expr => $value:expr ),* $(,)? ) => {
        vec![ $( $crate::stmt::Element::new($name, $value), )* ]
    };
}
