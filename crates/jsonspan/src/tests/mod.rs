mod arbitrary;
mod property_whitespace;
