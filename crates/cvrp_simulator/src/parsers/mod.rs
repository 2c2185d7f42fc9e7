pub mod cvrplib;
