pub mod city_lock;
