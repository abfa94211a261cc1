#[cfg(test)]
mod common;


#[cfg(test)]
mod test_probability;

#[cfg(test)]
mod test_statistics;
